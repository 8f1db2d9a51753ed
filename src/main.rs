// Copyright Chelsea Wen
// Cleaned up somewhat by Kyler Chin
use clap::Parser;
use geo::{point, Point};
use std::fs::File;
use std::io::BufWriter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use transport_times::{
    cell::CellDetails,
    cities::{group_by_continent, sort_switch_cities, MapAddress, SwitchCircle},
    classifier::mode_shares,
    config::{Command, Config},
    loader::{or_empty, DataSource},
    selection::{CookieStore, ViewSelection},
    Heatmap, Scenario, TravelMode,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

//converts a raw coordinate pair into a Point
pub fn make_point_from_coords(lon: f64, lat: f64) -> Point {
    point!(x: lon, y: lat)
}

async fn list_cities(source: &DataSource) {
    let Some(cities) = or_empty("city list", source.fetch_city_list().await) else {
        println!("no data available");
        return;
    };
    let groups = group_by_continent(&cities);
    for (continent, cities) in groups.by_name() {
        println!("{continent}");
        for city in cities {
            match MapAddress::for_city(city) {
                Some(address) => println!("  {:<24} {}", city.city, address.to_path()),
                None => println!("  {}", city.city),
            }
        }
    }
    println!("raw data: {}", source.csv_link());
}

async fn list_progress(source: &DataSource) {
    let Some(progress) = or_empty("collection progress", source.fetch_progress().await) else {
        println!("no data available");
        return;
    };
    for (region, cities) in progress {
        println!("{region}");
        for entry in cities {
            let status = if entry.is_complete() { "done" } else { "in progress" };
            println!("  {:<24} {status}", entry.city_name);
        }
    }
}

async fn list_switch(
    source: &DataSource,
    selection: &ViewSelection,
    scenario: Scenario,
    car_parking: u32,
    bike_parking: u32,
) {
    let fetched = source
        .fetch_switch_cities(scenario, car_parking, bike_parking)
        .await;
    let Some(records) = or_empty("switch cities", fetched) else {
        println!("no data available");
        return;
    };
    for record in sort_switch_cities(&records, selection.sort) {
        if record.point.is_nan() {
            println!("  {:<24} n/a", record.city);
            continue;
        }
        let circle = SwitchCircle::new(record.point, None);
        let min = if circle.is_max { "min. " } else { "" };
        println!(
            "  {:<24} {min}{}km (bike zone {:.1}% of disc)",
            record.city, record.point, circle.radius
        );
    }
}

async fn load_heatmap(source: &DataSource, city: &str) -> Option<Heatmap> {
    or_empty("heatmap", source.fetch_heatmap(city).await)
}

async fn show_map(
    source: &DataSource,
    selection: &ViewSelection,
    city: &str,
    output: Option<&std::path::Path>,
    selected: Option<i64>,
) -> anyhow::Result<()> {
    let Some(heatmap) = load_heatmap(source, city).await else {
        println!("no data available for {city}");
        return Ok(());
    };

    let shares = mode_shares(heatmap.iter_cells(), selection.scenario, selection.parking);
    println!(
        "{city}: {} cells, {} ({}) with {} min parking",
        shares.total_cells(),
        selection.scenario.label(),
        selection.scenario,
        selection.parking.minutes()
    );
    let total_population = shares.total_population();
    for mode in TravelMode::ALL {
        let share = shares.get(mode);
        let population_share = if total_population > 0.0 {
            share.population / total_population * 100.0
        } else {
            0.0
        };
        println!(
            "  {:<5} fastest in {:>5} cells, {:>5.1}% of residents",
            mode, share.cells, population_share
        );
    }

    if let Some(path) = output {
        let styled = heatmap.styled(selection, selected);
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, &styled)?;
        info!(path = %path.display(), "wrote styled layer");
    }
    Ok(())
}

async fn show_cell(
    source: &DataSource,
    city: &str,
    id: Option<i64>,
    at: Option<&[f64]>,
) -> anyhow::Result<()> {
    let Some(heatmap) = load_heatmap(source, city).await else {
        println!("no data available for {city}");
        return Ok(());
    };
    let found = match (id, at) {
        (Some(id), _) => heatmap.cell(id),
        (None, Some(&[lon, lat])) => heatmap.cell_at(make_point_from_coords(lon, lat)),
        _ => anyhow::bail!("pass either --id or --at <lon> <lat>"),
    };
    match found {
        Some(found) => println!(
            "{}",
            serde_json::to_string_pretty(&CellDetails::from_cell(&found.cell))?
        ),
        None => println!("Select a cell to view its information."),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    let cookies = CookieStore::new(&config.cookie_file);
    let selection = config.selection(cookies.read_parking().await);
    if config.parking.is_some() {
        if let Err(e) = cookies.write_parking(selection.parking).await {
            warn!(path = %cookies.path().display(), "could not store parking cookie: {e}");
        }
    }

    let source = DataSource::new(&config.data);
    info!(data = %config.data, ?selection, "starting");

    match &config.command {
        Command::Cities => list_cities(&source).await,
        Command::Progress => list_progress(&source).await,
        Command::Switch {
            time,
            car_parking,
            bike_parking,
        } => {
            let scenario = Scenario::from(time.as_str());
            list_switch(&source, &selection, scenario, *car_parking, *bike_parking).await
        }
        Command::Map {
            city,
            output,
            selected,
        } => show_map(&source, &selection, city, output.as_deref(), *selected).await?,
        Command::Cell { city, id, at } => show_cell(&source, city, *id, at.as_deref()).await?,
    }
    Ok(())
}

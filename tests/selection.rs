use transport_times::{
    common_enums::{DisplayMode, Scenario, SortDirection, TravelMode},
    selection::{parking_from_cookie_header, CookieStore, ParkingTime, ViewSelection},
};

#[test]
fn parking_is_clamped() {
    assert_eq!(ParkingTime::new(7.0).minutes(), 7.0);
    assert_eq!(ParkingTime::new(-3.0).minutes(), 0.0);
    assert_eq!(ParkingTime::new(40.0).minutes(), 15.0);
    assert_eq!(ParkingTime::new(f64::NAN).minutes(), 5.0);
    assert_eq!(ParkingTime::default().minutes(), 5.0);
}

#[test]
fn cookie_header_parsing() {
    assert_eq!(
        parking_from_cookie_header("theme=dark; ptime=12; lang=en"),
        Some(ParkingTime::new(12.0))
    );
    assert_eq!(
        parking_from_cookie_header("ptime=2.5"),
        Some(ParkingTime::new(2.5))
    );
    assert_eq!(parking_from_cookie_header("ptime=99"), Some(ParkingTime::new(15.0)));
    assert_eq!(parking_from_cookie_header("ptime=NaN"), None);
    assert_eq!(parking_from_cookie_header("ptime=soon"), None);
    assert_eq!(parking_from_cookie_header("xptime=3"), None);
    assert_eq!(parking_from_cookie_header(""), None);
}

#[test]
fn set_cookie_line() {
    assert_eq!(ParkingTime::new(7.0).to_set_cookie(), "ptime=7; Path=/");
    assert_eq!(ParkingTime::new(2.5).to_set_cookie(), "ptime=2.5; Path=/");
}

#[test]
fn selecting_the_active_mode_turns_the_layer_off() {
    let selection = ViewSelection::default();
    assert_eq!(selection.mode, DisplayMode::Fastest);

    let bike = selection.toggle_mode(DisplayMode::Single(TravelMode::Bike));
    assert_eq!(bike.mode, DisplayMode::Single(TravelMode::Bike));
    let off = bike.toggle_mode(DisplayMode::Single(TravelMode::Bike));
    assert_eq!(off.mode, DisplayMode::None);
    let fastest = off.toggle_mode(DisplayMode::Fastest);
    assert_eq!(fastest.mode, DisplayMode::Fastest);

    //transitions leave the original untouched
    assert_eq!(selection.mode, DisplayMode::Fastest);
}

#[test]
fn selection_defaults_and_updates() {
    let selection = ViewSelection::default()
        .with_scenario(Scenario::Midday)
        .with_sort(SortDirection::CityAsc)
        .with_parking(ParkingTime::new(10.0));
    assert_eq!(selection.scenario, Scenario::Midday);
    assert_eq!(selection.sort, SortDirection::CityAsc);
    assert_eq!(selection.parking_for(TravelMode::Car), 10.0);
    assert_eq!(selection.parking_for(TravelMode::Bike), 0.0);
}

#[test]
fn tags_parse_with_fallbacks() {
    assert_eq!(Scenario::from("m"), Scenario::Midday);
    assert_eq!(Scenario::from("evening"), Scenario::RushHour);
    assert_eq!(DisplayMode::from("pt"), DisplayMode::Single(TravelMode::Pt));
    assert_eq!(DisplayMode::from("fastest"), DisplayMode::Fastest);
    assert_eq!(DisplayMode::from("rocket"), DisplayMode::None);
    assert_eq!(SortDirection::from("city_asc"), SortDirection::CityAsc);
    assert_eq!(SortDirection::from(""), SortDirection::PtDsc);
    assert_eq!(String::from(SortDirection::PtAsc), "pt_asc");
    assert_eq!(String::from(DisplayMode::Single(TravelMode::Walk)), "walk");
}

#[tokio::test]
async fn cookie_store_round_trip() {
    let path = std::env::temp_dir().join(format!(
        "transport_times_cookie_{}",
        std::process::id()
    ));
    let store = CookieStore::new(&path);
    let _ = tokio::fs::remove_file(&path).await;

    assert_eq!(store.read_parking().await, None);
    store.write_parking(ParkingTime::new(9.0)).await.unwrap();
    assert_eq!(store.read_parking().await, Some(ParkingTime::new(9.0)));
    store.write_parking(ParkingTime::new(3.0)).await.unwrap();
    assert_eq!(store.read_parking().await, Some(ParkingTime::new(3.0)));

    tokio::fs::remove_file(&path).await.unwrap();
}

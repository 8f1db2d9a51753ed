use transport_times::{
    cities::{
        group_by_continent, sort_switch_cities, AddressError, CityRecord, MapAddress,
        ProgressByRegion, SwitchCircle, SwitchCityRecord,
    },
    common_enums::{Continent, SortDirection},
};

fn switch(city: &str, point: f64) -> SwitchCityRecord {
    SwitchCityRecord {
        city: city.to_string(),
        point,
    }
}

fn names(records: &[SwitchCityRecord]) -> Vec<&str> {
    records.iter().map(|r| r.city.as_str()).collect()
}

#[test]
fn unknown_continents_are_dropped() {
    let records = vec![
        CityRecord::new("Oslo", "EUR"),
        CityRecord::new("Lima", "XYZ"),
        CityRecord::new("Quito", "SAM"),
    ];
    let groups = group_by_continent(&records);
    assert_eq!(groups.len(), 2);

    let by_name = groups.by_name();
    assert_eq!(by_name[0].0, "Europe");
    assert_eq!(by_name[0].1, &records[0..1]);
    assert_eq!(by_name[1].0, "South America");
    assert_eq!(by_name[1].1, &records[2..3]);
    assert!(groups.flatten().iter().all(|r| r.city != "Lima"));
}

#[test]
fn groups_sort_by_byte_order() {
    let records = vec![
        CityRecord::new("Zurich", "EUR"),
        CityRecord::new("aarhus", "EUR"),
        CityRecord::new("Amsterdam", "EUR"),
        CityRecord::new("Sydney", "OCE"),
        CityRecord::new("Auckland", "OCE"),
    ];
    let groups = group_by_continent(&records);
    let europe: Vec<&str> = groups
        .get(Continent::Europe)
        .unwrap()
        .iter()
        .map(|r| r.city.as_str())
        .collect();
    assert_eq!(europe, vec!["Amsterdam", "Zurich", "aarhus"]);

    let oceania: Vec<&str> = groups
        .get(Continent::Oceania)
        .unwrap()
        .iter()
        .map(|r| r.city.as_str())
        .collect();
    assert_eq!(oceania, vec!["Auckland", "Sydney"]);
    assert!(groups.get(Continent::Asia).is_none());

    //input is left as it was
    assert_eq!(records[0].city, "Zurich");
}

#[test]
fn grouping_keeps_every_known_record_once() {
    let records = vec![
        CityRecord::new("Berlin", "EUR"),
        CityRecord::new("Delhi", "ASI"),
        CityRecord::new("Bogota", "SAM"),
        CityRecord::new("Perth", "OCE"),
        CityRecord::new("Atlantis", "ATL"),
        CityRecord::new("Chicago", "NAM"),
        CityRecord::new("Berlin", "EUR"),
    ];
    let mut flattened = group_by_continent(&records).flatten();
    let mut expected: Vec<CityRecord> = records
        .iter()
        .filter(|r| r.continent != "ATL")
        .cloned()
        .collect();
    flattened.sort_by(|a, b| a.city.cmp(&b.city));
    expected.sort_by(|a, b| a.city.cmp(&b.city));
    assert_eq!(flattened, expected);
}

#[test]
fn grouping_is_deterministic() {
    let records = vec![
        CityRecord::new("Mumbai", "ASI"),
        CityRecord::new("Kuala Lumpur", "ASI"),
        CityRecord::new("Toronto", "NAM"),
    ];
    assert_eq!(group_by_continent(&records), group_by_continent(&records));
}

#[test]
fn switch_list_orderings() {
    let records = vec![
        switch("Utrecht", 6.5),
        switch("Houston", 2.1),
        switch("Amsterdam", 6.5),
        switch("Dublin", 11.0),
    ];

    let desc = sort_switch_cities(&records, SortDirection::PtDsc);
    assert_eq!(names(&desc), vec!["Dublin", "Utrecht", "Amsterdam", "Houston"]);

    let asc = sort_switch_cities(&records, SortDirection::PtAsc);
    assert_eq!(names(&asc), vec!["Houston", "Utrecht", "Amsterdam", "Dublin"]);

    let by_city = sort_switch_cities(&records, SortDirection::CityAsc);
    assert_eq!(names(&by_city), vec!["Amsterdam", "Dublin", "Houston", "Utrecht"]);

    //the input order is untouched
    assert_eq!(names(&records), vec!["Utrecht", "Houston", "Amsterdam", "Dublin"]);
}

#[test]
fn unknown_sort_direction_falls_back_to_descending() {
    let records = vec![switch("A", 1.0), switch("B", 3.0), switch("C", 2.0)];
    let fallback = sort_switch_cities(&records, SortDirection::from("km_sideways"));
    assert_eq!(names(&fallback), vec!["B", "C", "A"]);
}

#[test]
fn resorting_a_sorted_list_changes_nothing() {
    let records = vec![
        switch("Paris", 4.0),
        switch("Bern", 4.0),
        switch("Riga", 9.0),
        switch("York", 4.0),
    ];
    for direction in [
        SortDirection::PtDsc,
        SortDirection::PtAsc,
        SortDirection::CityAsc,
    ] {
        let once = sort_switch_cities(&records, direction);
        let twice = sort_switch_cities(&once, direction);
        assert_eq!(once, twice);
    }
}

#[test]
fn nan_points_sort_last() {
    let records = vec![switch("A", f64::NAN), switch("B", 1.0), switch("C", 2.0)];
    let desc = sort_switch_cities(&records, SortDirection::PtDsc);
    assert_eq!(names(&desc), vec!["C", "B", "A"]);
    let asc = sort_switch_cities(&records, SortDirection::PtAsc);
    assert_eq!(names(&asc), vec!["B", "C", "A"]);
}

#[test]
fn unusable_switch_points_read_as_nan() {
    let records: Vec<SwitchCityRecord> = serde_json::from_str(
        r#"[{"city":"Oslo","point":4.2},{"city":"Lima","point":null},
            {"city":"Quito","point":"7.5"},{"city":"Cusco","point":"far"},{"city":"Bern"}]"#,
    )
    .unwrap();
    assert_eq!(records[0].point, 4.2);
    assert!(records[1].point.is_nan());
    assert_eq!(records[2].point, 7.5);
    assert!(records[3].point.is_nan());
    assert!(records[4].point.is_nan());

    let desc = sort_switch_cities(&records, SortDirection::PtDsc);
    assert_eq!(names(&desc), vec!["Quito", "Oslo", "Lima", "Cusco", "Bern"]);
}

#[test]
fn switch_circle_geometry() {
    let small = SwitchCircle::new(1.9, None);
    assert_eq!(small.scale, 9.5);
    assert!((small.radius - 10.0).abs() < 1e-9);
    assert!(small.show_house);
    assert!(!small.show_tree);
    assert!(!small.is_max);

    let capped = SwitchCircle::new(12.0, None);
    assert!(capped.is_max);
    assert!((capped.radius - 47.5).abs() < 1e-9);
    assert!(capped.show_tree);

    let custom = SwitchCircle::new(5.0, Some(10.0));
    assert_eq!(custom.fraction, 0.5);
    assert!(!custom.show_house && !custom.show_tree);

    let missing = SwitchCircle::new(f64::NAN, Some(0.0));
    assert_eq!(missing.point, 0.0);
    assert_eq!(missing.scale, 9.5);
    assert_eq!(missing.radius, 0.0);
}

#[test]
fn map_address_round_trip() {
    let mut record = CityRecord::new("Buenos Aires", "SAM");
    record.ctr_name = "Palacio Municipal".to_string();
    record.ctr_lat = Some(-34.6083);
    record.ctr_lon = Some(-58.3712);

    let address = MapAddress::for_city(&record).unwrap();
    let path = address.to_path();
    assert_eq!(path, "/map/Buenos_Aires/Palacio Municipal/-34.6083/-58.3712/");

    let parsed = MapAddress::parse(&path).unwrap();
    assert_eq!(parsed, address);
    assert_eq!(parsed.city_friendly(), "Buenos Aires");
    assert_eq!(parsed.center().x(), -58.3712);
}

#[test]
fn map_address_errors() {
    assert_eq!(
        MapAddress::parse("/about/"),
        Err(AddressError::NotAMapPath("/about/".to_string()))
    );
    assert!(matches!(
        MapAddress::parse("/map/Oslo/Radhus/59.9"),
        Err(AddressError::MissingSegment(_))
    ));
    assert_eq!(
        MapAddress::parse("/map/Oslo/Radhus/north/10.7"),
        Err(AddressError::BadCoordinate("north".to_string()))
    );
    //no centre, no map link
    assert!(MapAddress::for_city(&CityRecord::new("Oslo", "EUR")).is_none());
}

#[test]
fn city_records_keep_extra_columns() {
    let record: CityRecord = serde_json::from_value(serde_json::json!({
        "city": "Oslo",
        "continent": "EUR",
        "ctr_name": "Oslo Radhus",
        "ctr_lat": 59.9119,
        "ctr_lon": "?",
        "car_r_s": 24.5
    }))
    .unwrap();
    assert_eq!(record.ctr_lat, Some(59.9119));
    assert_eq!(record.ctr_lon, None);
    assert_eq!(record.extra["car_r_s"], 24.5);
    assert!(record.center().is_none());
}

#[test]
fn progress_entries() {
    let progress: ProgressByRegion = serde_json::from_str(
        r#"{"Europe": [{"city_name": "Helsinki", "frac_req_ok": 1.0},
                       {"city_name": "Copenhagen", "frac_req_ok": 0.9}]}"#,
    )
    .unwrap();
    let europe = &progress["Europe"];
    assert!(europe[0].is_complete());
    assert!(!europe[1].is_complete());
}

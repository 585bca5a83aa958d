//! End-to-end runs of the listings pipeline over CSV inputs.

use std::fs;
use std::path::{Path, PathBuf};

use listings_pipeline::{run, Config, PipelineError};
use polars::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

const FULL_LISTINGS: &str = "\
id,Neighbourhood Cleansed,Price,Room Type,Number of Reviews,availability_365,host_id,estimated_revenue,Property Type
1,Loop,\"$1,234.00\",Entire home/apt,10,120,100,5000.5,Condo
1,Loop,$20.00,Entire home/apt,99,5,100,1.0,Condo
2,Uptown,$85.00,Private room,4,n/a,200,1200,House
3,,$60.00,Private room,7,30,300,800,House
4,Loop,$150.00,Entire home/apt,6,,100,2500,Loft
5,Logan Square,$95.00,Shared room,0,365,400,700,House
";

const NO_REVENUE_LISTINGS: &str = "\
id,neighbourhood_cleansed,price,room_type,number_of_reviews
1,Loop,$100.00,Private room,3
2,Uptown,$80.00,Private room,5
";

fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(filename)
}

fn write_input(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("listings.csv");
    fs::write(&path, contents).expect("Failed to write input CSV");
    path
}

fn config_for(dir: &TempDir, input: PathBuf) -> Config {
    Config {
        input_path: input,
        output_dir: dir.path().join("out"),
        ..Config::default()
    }
}

fn read_csv(path: &Path) -> DataFrame {
    CsvReader::from_path(path)
        .expect("Failed to create CSV reader")
        .has_header(true)
        .finish()
        .expect("Failed to read CSV file")
}

// ============================================================================
// Full Pipeline Tests
// ============================================================================

#[test]
fn test_full_run_writes_every_output() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, write_input(&dir, FULL_LISTINGS));

    let report = run(&config).expect("Pipeline should complete successfully");

    assert_eq!(report.cleaning.rows_in, 6);
    assert_eq!(report.cleaning.duplicates_removed, 1);
    assert_eq!(report.cleaning.null_rows_dropped, 1);
    assert_eq!(report.cleaning.rows_out, 4);
    // "n/a" and the empty cell
    assert_eq!(report.cleaning.availability_coerced, 2);

    for name in [
        "listings_clean.csv",
        "listings_by_neighbourhood.csv",
        "reviews_by_room_type.csv",
        "top_hosts_revenue.csv",
        "avg_price_by_property_type.csv",
    ] {
        let path = config.output_dir.join(name);
        assert!(path.exists(), "{name} should be written");
        assert!(report.files_written.contains(&path));
    }

    assert_eq!(report.chart_path, Some(config.chart_path()));
    assert!(config.chart_path().exists());
}

#[test]
fn test_cleaned_file_contents() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, write_input(&dir, FULL_LISTINGS));
    run(&config).unwrap();

    let cleaned = read_csv(&config.output_dir.join("listings_clean.csv"));

    assert_eq!(
        cleaned.get_column_names(),
        &[
            "id",
            "neighbourhood_cleansed",
            "price",
            "room_type",
            "number_of_reviews",
            "availability_365",
            "host_id",
            "estimated_revenue",
            "property_type",
        ]
    );

    let ids: Vec<Option<i64>> = cleaned.column("id").unwrap().i64().unwrap().into_iter().collect();
    assert_eq!(ids, vec![Some(1), Some(2), Some(4), Some(5)]);

    let prices = cleaned.column("price").unwrap().cast(&DataType::Float64).unwrap();
    let prices = prices.f64().unwrap();
    assert_eq!(prices.get(0), Some(1234.0));
    assert!(prices.into_iter().all(|p| p.map_or(false, |p| p >= 0.0)));

    let availability = cleaned.column("availability_365").unwrap().i64().unwrap();
    assert_eq!(availability.get(1), Some(0));
    assert_eq!(availability.get(2), Some(0));
}

#[test]
fn test_summary_files() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, write_input(&dir, FULL_LISTINGS));
    run(&config).unwrap();

    let by_neighbourhood = read_csv(&config.output_dir.join("listings_by_neighbourhood.csv"));
    assert_eq!(by_neighbourhood.get_column_names(), &["neighbourhood_cleansed", "listing_count"]);
    let top = by_neighbourhood.column("neighbourhood_cleansed").unwrap();
    assert_eq!(top.str().unwrap().get(0), Some("Loop"));

    let reviews = read_csv(&config.output_dir.join("reviews_by_room_type.csv"));
    let total: i64 = reviews.column("total_reviews").unwrap().i64().unwrap().sum().unwrap();
    // 10 + 4 + 6 + 0 after dedup and null drop
    assert_eq!(total, 20);

    let hosts = read_csv(&config.output_dir.join("top_hosts_revenue.csv"));
    assert!(hosts.height() <= 10);
    let host_ids = hosts.column("host_id").unwrap().i64().unwrap();
    assert_eq!(host_ids.get(0), Some(100));
}

#[test]
fn test_conditional_summary_is_skipped() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, write_input(&dir, NO_REVENUE_LISTINGS));

    let report = run(&config).unwrap();

    assert!(!config.output_dir.join("top_hosts_revenue.csv").exists());
    assert!(!config.output_dir.join("avg_price_by_property_type.csv").exists());
    assert!(config.output_dir.join("reviews_by_room_type.csv").exists());
    assert!(report.highlights.top_host.is_none());
    assert!(!report.highlights.render().contains("Top host"));
}

#[test]
fn test_highlights_from_run() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, write_input(&dir, FULL_LISTINGS));

    let highlights = run(&config).unwrap().highlights;

    let neighbourhood = highlights.busiest_neighbourhood.unwrap();
    assert_eq!(neighbourhood.label, "Loop");
    assert_eq!(neighbourhood.value, 2);

    let room = highlights.favourite_room_type.unwrap();
    assert_eq!(room.label, "Entire home/apt");
    assert!((room.value - 80.0).abs() < 1e-9);

    let host = highlights.top_host.unwrap();
    assert_eq!(host.label, "100");
    assert!((host.value - 7500.5).abs() < 1e-9);
}

#[test]
fn test_late_text_values_in_numeric_columns_are_cleaned() {
    let dir = TempDir::new().unwrap();
    let mut input = String::from("id,neighbourhood_cleansed,price,availability_365\n");
    for id in 1..=150 {
        input.push_str(&format!("{id},Loop,85,{}\n", id % 365));
    }
    input.push_str("998,Uptown,\"$1,234.00\",30\n");
    input.push_str("999,Loop,$10,n/a\n");
    let config = config_for(&dir, write_input(&dir, &input));

    let report = run(&config).expect("Late text values should not abort the run");

    assert_eq!(report.cleaning.rows_out, 152);
    assert_eq!(report.cleaning.availability_coerced, 1);

    let cleaned = read_csv(&config.output_dir.join("listings_clean.csv"));
    let prices = cleaned.column("price").unwrap().cast(&DataType::Float64).unwrap();
    let prices = prices.f64().unwrap();
    assert_eq!(prices.get(0), Some(85.0));
    assert_eq!(prices.get(150), Some(1234.0));
    assert_eq!(prices.get(151), Some(10.0));

    let availability = cleaned.column("availability_365").unwrap().i64().unwrap();
    assert_eq!(availability.get(151), Some(0));
}

#[test]
fn test_workbook_run() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, fixture_path("listings.xlsx"));

    let report = run(&config).unwrap();

    // duplicate id 2 and the row without a neighbourhood are gone
    assert_eq!(report.cleaning.rows_in, 4);
    assert_eq!(report.cleaning.duplicates_removed, 1);
    assert_eq!(report.cleaning.null_rows_dropped, 1);
    assert_eq!(report.cleaning.availability_coerced, 1);

    let cleaned = read_csv(&config.output_dir.join("listings_clean.csv"));
    let prices = cleaned.column("price").unwrap().cast(&DataType::Float64).unwrap();
    assert_eq!(prices.f64().unwrap().get(1), Some(1234.0));
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_missing_input_aborts_before_output() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, dir.path().join("nope.xlsx"));

    let err = run(&config).unwrap_err();

    assert!(matches!(err, PipelineError::MissingFile(_)));
    assert!(!config.output_dir.exists());
}

#[test]
fn test_missing_sheet_aborts_before_output() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        sheet_name: "listings_2024".to_string(),
        ..config_for(&dir, fixture_path("listings.xlsx"))
    };

    let err = run(&config).unwrap_err();

    assert!(matches!(err, PipelineError::MissingSheet { ref sheet, .. } if sheet == "listings_2024"));
    assert!(!config.output_dir.exists());
}

#[test]
fn test_malformed_price_aborts_run() {
    let dir = TempDir::new().unwrap();
    let input = "\
id,neighbourhood_cleansed,price
1,Loop,$100.00
2,Uptown,ask host
";
    let config = config_for(&dir, write_input(&dir, input));

    let err = run(&config).unwrap_err();
    assert!(matches!(err, PipelineError::MalformedPrice { row: 1, .. }));
}

use tabulearn::dataset::{Cell, Column, ColumnStatistics, ColumnType, Dataset, TimestampCodec};
use tabulearn::model::{LinearRegression, LogisticRegression};
use tabulearn::preprocessing::{Max, Mean};
use tabulearn::trainer::Trainer;

const HEADER: &str = "date,area,average_price,code,houses_sold,no_of_crimes,borough_flag";

const SAMPLE: &str = "\
date,area,average_price,code,houses_sold,no_of_crimes,borough_flag
2020-01-01,A,100,X,5,1.0,0
2020-01-02,B,,Y,,2.0,1
";

const BOROUGHS: &str = "\
date,area,average_price,code,houses_sold,no_of_crimes,borough_flag
1995-01-01,city of london,91449,E09000001,17,,1
1995-01-01,barking and dagenham,50460,E09000002,934,2211.0,1
1995-01-01,south east,64018,E12000008,,,0
1995-02-01,city of london,82203,E09000001,7,,1
1995-02-01,barking and dagenham,51085,E09000002,892,1869.0,1
1995-02-01,south east,63715,E12000008,10562,,0
1995-03-01,inner london,78251,E13000001,3050,,0
1995-03-01,barnet,93284,E09000003,,2893.0,1
1995-03-01,outer london,72758,E13000002,11010,,0
";

fn london_schema() -> Dataset {
    let mut ds = Dataset::new();
    ds.add_column(Column::timestamp(
        "date",
        0,
        TimestampCodec::with_format("%Y-%m-%d"),
    ))
    .unwrap();
    ds.add_column(Column::string("area", 1)).unwrap();
    ds.add_column(Column::int("average_price", 2)).unwrap();
    ds.add_column(Column::string("code", 3)).unwrap();
    ds.add_column(Column::int("houses_sold", 4)).unwrap();
    ds.add_column(Column::float("no_of_crimes", 5)).unwrap();
    ds.add_column(Column::int("borough_flag", 6)).unwrap();
    ds
}

#[test]
fn test_two_row_statistics_and_mean_fill() {
    let mut ds = london_schema();
    ds.load_csv(SAMPLE.as_bytes(), true).unwrap();

    let stats = ds.statistics("houses_sold").unwrap().unwrap();
    assert_eq!(stats.valid(), 1);
    assert_eq!(stats.missing(), 1);

    ds.fill("houses_sold", &Mean).unwrap();
    assert_eq!(ds.cell_by_name(1, "houses_sold"), Some(&Cell::Int(5)));
    assert_eq!(ds.cell(1, 4), Some(&Cell::Int(5)));

    let stats = ds.statistics("houses_sold").unwrap().unwrap();
    assert_eq!(stats.valid(), 2);
    assert_eq!(stats.missing(), 0);
}

#[test]
fn test_valid_plus_missing_is_row_count() {
    let mut ds = london_schema();
    ds.load_csv(BOROUGHS.as_bytes(), true).unwrap();

    for column in ds.columns() {
        let stats = ds.statistics(column.name()).unwrap().unwrap();
        assert_eq!(stats.valid() + stats.missing(), ds.len(), "{}", column.name());
    }

    let Some(ColumnStatistics::Categorical { unique, top, .. }) = ds.statistics("area").unwrap()
    else {
        panic!("area should be categorical");
    };
    assert_eq!(unique, 6);
    assert_eq!(top.as_deref(), Some("city of london"));
}

#[test]
fn test_export_round_trip_keeps_missing() {
    let mut ds = london_schema();
    ds.load_csv(BOROUGHS.as_bytes(), true).unwrap();
    let out = ds.to_csv_string().unwrap();
    assert!(out.starts_with(HEADER));

    let mut again = london_schema();
    again.load_csv(out.as_bytes(), true).unwrap();
    for row in 0..ds.len() {
        for column in ds.columns() {
            assert_eq!(
                again.cell_by_name(row, column.name()),
                ds.cell_by_name(row, column.name())
            );
        }
    }
}

fn prepared() -> Dataset {
    let mut ds = london_schema();
    ds.load_csv(BOROUGHS.as_bytes(), true).unwrap();

    ds.fill("houses_sold", &Mean).unwrap();
    ds.fill("no_of_crimes", &Mean).unwrap();
    for name in ["average_price", "houses_sold", "no_of_crimes", "borough_flag"] {
        assert!(ds.normalize(name, &Max).unwrap());
    }
    ds.normalize_string_by_encode("area").unwrap();
    ds.normalize_string_by_encode("code").unwrap();
    ds.normalize("area", &Max).unwrap();
    ds.normalize("code", &Max).unwrap();
    ds.add_x0().unwrap();
    ds
}

#[test]
fn test_preparation_pipeline() {
    let ds = prepared();

    assert_eq!(ds.column("x0").unwrap().index(), 0);
    assert_eq!(ds.column("borough_flag").unwrap().index(), 7);
    for name in ["area", "average_price", "code", "houses_sold", "no_of_crimes"] {
        assert_eq!(ds.column(name).unwrap().column_type(), ColumnType::Float);
        let max = ds
            .values(name)
            .map(Cell::as_f64)
            .fold(f64::MIN, f64::max);
        assert_eq!(max, 1.0, "{}", name);
    }
    // date is untouched by numeric transforms
    assert_eq!(ds.column("date").unwrap().column_type(), ColumnType::Timestamp);
}

#[test]
fn test_train_on_prepared_columns() {
    let ds = prepared();
    let features = ds
        .indices_of(&["x0", "area", "average_price", "code", "houses_sold", "no_of_crimes"])
        .unwrap();
    let label = ds.column("borough_flag").unwrap().index();

    let samples = ds.column_samples(&features, label).unwrap();
    let mut linear = LinearRegression::new();
    let history = Trainer::builder(0.1)
        .max_epochs(300)
        .log_every(0)
        .build()
        .fit(&mut linear, &samples)
        .unwrap();
    assert_eq!(history.final_params.len(), features.len());
    assert!(history.losses.windows(2).all(|w| w[1] <= w[0] + 1e-12));

    let x = ds.matrix(&features).unwrap();
    let y = ds.labels(label).unwrap();
    let dense = tabulearn::model::MatrixSamples::new(x.view(), y.view()).unwrap();
    let mut logistic = LogisticRegression::new();
    let history = Trainer::builder(0.5)
        .max_epochs(300)
        .build()
        .fit(&mut logistic, &dense)
        .unwrap();
    assert!(history.losses.last().unwrap() < history.losses.first().unwrap());
}

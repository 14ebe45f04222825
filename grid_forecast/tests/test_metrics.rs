use approx::assert_relative_eq;
use chrono::NaiveDate;
use grid_forecast::metrics::{forecast_accuracy, ForecastSummary};
use grid_forecast::result::QuantityForecast;
use grid_forecast::{ForecastError, ForecastResult, Quantity};
use pretty_assertions::assert_eq;

fn dates(n: u32) -> Vec<NaiveDate> {
    (1..=n)
        .map(|d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap())
        .collect()
}

fn result(demand: &[f64], price: &[f64]) -> ForecastResult {
    let dates = dates(demand.len() as u32);
    ForecastResult::merge(
        QuantityForecast::new(Quantity::Demand, &dates, demand).unwrap(),
        QuantityForecast::new(Quantity::Price, &dates, price).unwrap(),
    )
    .unwrap()
}

#[test]
fn test_forecast_accuracy() {
    let accuracy = forecast_accuracy(&[1.0, 2.0, 3.0], &[1.0, 2.0, 4.0]).unwrap();

    assert_relative_eq!(accuracy.mae, 1.0 / 3.0);
    assert_relative_eq!(accuracy.mse, 1.0 / 3.0);
    assert_relative_eq!(accuracy.rmse, (1.0f64 / 3.0).sqrt());
    assert_relative_eq!(accuracy.bias, -1.0 / 3.0);
    assert_relative_eq!(accuracy.mape.unwrap(), 25.0 / 3.0);
    assert_relative_eq!(accuracy.smape, 200.0 / 7.0 / 3.0);
}

#[test]
fn test_percentage_error_ignores_zero_actuals() {
    let accuracy = forecast_accuracy(&[1.0, 3.0, 6.0], &[0.0, 2.0, 4.0]).unwrap();

    // Only the two non-zero actuals contribute: (50% + 50%) / 2
    assert_relative_eq!(accuracy.mape.unwrap(), 50.0);
    assert_relative_eq!(accuracy.bias, 4.0 / 3.0);

    let all_zero = forecast_accuracy(&[1.0, 0.0], &[0.0, 0.0]).unwrap();
    assert_eq!(all_zero.mape, None);
    assert_relative_eq!(all_zero.smape, 100.0);
    assert!(all_zero.to_string().contains("MAPE n/a"));
}

#[test]
fn test_forecast_accuracy_perfect() {
    let accuracy = forecast_accuracy(&[5.0, 6.0], &[5.0, 6.0]).unwrap();

    assert_eq!(accuracy.mae, 0.0);
    assert_eq!(accuracy.rmse, 0.0);
    assert_eq!(accuracy.smape, 0.0);
    assert_eq!(accuracy.bias, 0.0);
    assert_eq!(accuracy.to_string(), "MAE 0.0000 | RMSE 0.0000 | bias +0.0000 | sMAPE 0.00% | MAPE 0.00%");
}

#[test]
fn test_forecast_accuracy_length_mismatch() {
    assert!(matches!(
        forecast_accuracy(&[1.0], &[1.0, 2.0]),
        Err(ForecastError::DataError(_))
    ));
    assert!(forecast_accuracy(&[], &[]).is_err());
}

#[test]
fn test_summary() {
    let summary = ForecastSummary::from_result(&result(
        &[100.0, 300.0, 200.0],
        &[40.0, -5.0, 10.0],
    ))
    .unwrap();
    let days = dates(3);

    assert_eq!(summary.peak_demand.date, days[1]);
    assert_eq!(summary.peak_demand.value, 300.0);
    assert_eq!(summary.total_demand, 600.0);
    assert_eq!(summary.peak_price.date, days[0]);

    let lowest = summary.lowest_price.unwrap();
    assert_eq!(lowest.date, days[2]);
    assert_eq!(lowest.value, 10.0);
    assert_relative_eq!(summary.average_price, 15.0);

    let text = summary.to_string();
    assert!(text.contains("Peak demand"));
}

#[test]
fn test_summary_without_positive_prices() {
    let summary = ForecastSummary::from_result(&result(&[1.0, 2.0], &[0.0, -1.0])).unwrap();

    assert_eq!(summary.lowest_price, None);
    assert!(summary.to_string().contains("n/a"));
}

#[test]
fn test_summary_of_empty_result() {
    let empty = result(&[], &[]);

    assert!(matches!(
        ForecastSummary::from_result(&empty),
        Err(ForecastError::DataError(_))
    ));
}

#[test]
fn test_result_json_shape() {
    let json = result(&[10.5], &[80.25]).to_json().unwrap();

    assert_eq!(
        json,
        r#"[{"date":"2024-03-01","demand_forecast":10.5,"price_forecast":80.25}]"#
    );
}

#[test]
fn test_merge_rejects_mismatched_dates() {
    let days = dates(2);
    let demand = QuantityForecast::new(Quantity::Demand, &days, &[1.0, 2.0]).unwrap();
    let price = QuantityForecast::new(Quantity::Price, &days[..1], &[1.0]).unwrap();
    assert!(ForecastResult::merge(demand.clone(), price).is_err());

    let shifted = QuantityForecast::new(Quantity::Price, &dates(3)[1..], &[1.0, 2.0]).unwrap();
    assert!(matches!(
        ForecastResult::merge(demand, shifted),
        Err(ForecastError::DataError(_))
    ));
}

#[test]
fn test_quantity_forecast_validation() {
    let days = dates(2);

    assert!(matches!(
        QuantityForecast::new(Quantity::Demand, &days, &[1.0]),
        Err(ForecastError::ModelError(_))
    ));
    assert!(QuantityForecast::new(Quantity::Demand, &days, &[1.0, f64::NAN]).is_err());
}

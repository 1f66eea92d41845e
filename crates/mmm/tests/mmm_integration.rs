//! Integration tests for the mmm stack

use mmm_facade::prelude::*;

fn weeks(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

/// y = 2 + 3*x1 + 2*x2 with noise far below the tolerance.
fn linear_table(n: usize) -> ObservationTable {
    let x1: Vec<f64> = weeks(n).iter().map(|t| (t * 0.21).sin().abs() * 2.0).collect();
    let x2: Vec<f64> = weeks(n).iter().map(|t| (t * 0.13).cos() + 1.5).collect();
    let y: Vec<f64> = (0..n)
        .map(|i| 2.0 + 3.0 * x1[i] + 2.0 * x2[i] + 1e-3 * ((i * 37 % 17) as f64 / 17.0 - 0.5))
        .collect();
    ObservationTable::from_columns(vec![("x1", x1), ("x2", x2), ("y", y)]).unwrap()
}

// ============================================================================
// Transforms
// ============================================================================

#[test]
fn test_adstock_recurrence_holds() {
    let series = vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    for alpha in [0.0, 0.25, 0.5, 0.75, 0.95] {
        let out = geometric_adstock(&series, alpha).unwrap();
        assert_eq!(out.len(), series.len());
        assert_eq!(out[0], series[0]);
        for i in 1..out.len() {
            assert!((out[i] - (alpha * out[i - 1] + series[i])).abs() < 1e-12);
        }
    }
}

#[test]
fn test_adstock_empty_series() {
    assert!(matches!(
        geometric_adstock(&[], 0.5),
        Err(MmmError::InvalidArgument { .. })
    ));
}

#[test]
fn test_saturation_range_and_origin() {
    let xs: Vec<f64> = (-50..=50).map(|i| i as f64 / 10.0).collect();
    for lambda in [0.1, 1.0, 3.0] {
        for v in saturation(&xs, lambda) {
            assert!(v > -1.0 && v < 1.0);
        }
        assert_eq!(saturation(&[0.0], lambda)[0], 0.0);
    }
}

#[test]
fn test_mean_scaling_centres_columns() {
    let table = linear_table(40);
    let scaled = mean_scaling(&table, &["x1", "x2"]).unwrap();
    for name in ["x1_scaled", "x2_scaled"] {
        let mean = scaled.mean(name).unwrap();
        assert!(mean.abs() < 1e-12);
    }
}

// ============================================================================
// Regression
// ============================================================================

#[test]
fn test_recovers_known_coefficients() {
    let table = linear_table(80);
    let mut model = LinearRegression::new(&table, "y", ["x1", "x2"]).unwrap();
    model.fit().unwrap();

    let coefficients = model.get_coefficients().unwrap();
    let expected = [("x1", 3.0), ("x2", 2.0), ("intercept", 2.0)];
    for (name, value) in expected {
        let estimate = coefficients.get(name).unwrap();
        assert!((estimate - value).abs() < 0.05, "{}: {}", name, estimate);
    }
    let keys: Vec<&str> = coefficients.keys().collect();
    assert_eq!(keys, vec!["x1", "x2", "intercept"]);
}

#[test]
fn test_missing_predictor_is_named() {
    let table = linear_table(40);
    let mut model = LinearRegression::new(&table, "y", ["x1", "x3"]).unwrap();
    assert_eq!(
        model.fit().unwrap_err(),
        MmmError::MissingColumn(vec!["x3".to_string()])
    );
}

#[test]
fn test_degrees_of_freedom_boundary() {
    // dof = 32 - 1 - 1 = 30: approximation not valid
    let table = linear_table(32);
    let mut model = LinearRegression::new(&table, "y", ["x1"]).unwrap();
    assert!(matches!(model.fit(), Err(MmmError::NotSupported { .. })));

    // dof = 31: p-values available
    let table = linear_table(33);
    let mut model = LinearRegression::new(&table, "y", ["x1"]).unwrap();
    let result = model.fit().unwrap();
    assert_eq!(result.degrees_of_freedom, 31);
    for e in &result.estimates {
        assert!(e.p_value >= 0.0 && e.p_value <= 1.0);
    }
}

#[test]
fn test_not_fitted_operations() {
    let table = linear_table(40);
    let model = LinearRegression::new(&table, "y", ["x1", "x2"]).unwrap();
    assert!(!model.is_fitted());
    assert!(matches!(model.get_coefficients(), Err(MmmError::NotFitted)));
    assert!(matches!(model.summary(), Err(MmmError::NotFitted)));
}

#[test]
fn test_significant_and_insignificant_predictors() {
    let n = 120;
    let noise: Vec<f64> = (0..n).map(|i| ((i * 7919) % 101) as f64 / 101.0 - 0.5).collect();
    let signal: Vec<f64> = (0..n).map(|i| (i as f64 * 0.3).sin()).collect();
    let irrelevant: Vec<f64> = (0..n).map(|i| ((i * 31) % 13) as f64).collect();
    let y: Vec<f64> = (0..n).map(|i| 1.0 + 4.0 * signal[i] + noise[i]).collect();
    let table = ObservationTable::from_columns(vec![
        ("signal", signal),
        ("irrelevant", irrelevant),
        ("y", y),
    ])
    .unwrap();

    let mut model = LinearRegression::new(&table, "y", ["signal", "irrelevant"]).unwrap();
    let result = model.fit().unwrap();
    assert!(result.estimate("signal").unwrap().p_value < 0.001);
    assert!(result.estimate("irrelevant").unwrap().t_value.abs() < result.estimate("signal").unwrap().t_value.abs());
}

// ============================================================================
// Contributions
// ============================================================================

#[test]
fn test_contributions_sum_to_fitted_total() {
    let table = linear_table(60);
    let mut model = LinearRegression::new(&table, "y", ["x1", "x2"]).unwrap();
    let fitted_total: f64 = model.fit().unwrap().fitted_values.iter().sum();
    let coefficients = model.get_coefficients().unwrap();

    let engine = Contributions::new(&table, coefficients.clone());
    let decomposition = engine.decomposition().unwrap();
    let ctv = engine.contribution_to_volume(&decomposition);

    // Independent computation: coefficient times column sum, intercept times rows
    let independent: f64 = coefficients
        .iter()
        .map(|(name, coefficient)| {
            if name == INTERCEPT {
                coefficient * table.n_rows() as f64
            } else {
                coefficient * table.sum(name).unwrap()
            }
        })
        .sum();

    assert!((ctv.total() - independent).abs() < 1e-8);
    assert!((ctv.total() - fitted_total).abs() < 1e-8);
}

#[test]
fn test_relative_contribution_examples() {
    let table = linear_table(40);
    let engine = Contributions::new(&table, CoefficientMap::new());

    let ctv: ContributionMap = [("a", 30.0), ("b", 70.0)].into_iter().collect();
    let rel = engine.rel_contribution_to_volume(&["a", "b"], &ctv).unwrap();
    assert!((rel.get("a").unwrap() - 0.3).abs() < 1e-12);
    assert!((rel.get("b").unwrap() - 0.7).abs() < 1e-12);

    let ctv: ContributionMap = [("a", 50.0), ("b", -50.0)].into_iter().collect();
    assert!(matches!(
        engine.rel_contribution_to_volume(&["a", "b"], &ctv),
        Err(MmmError::DegenerateAggregate(_))
    ));
}

#[test]
fn test_roi_examples() {
    let table = linear_table(40);
    let engine = Contributions::new(&table, CoefficientMap::new());
    let ctv: ContributionMap = [("a", 50.0)].into_iter().collect();

    let zero: CostMap = [("a", 0.0)].into_iter().collect();
    assert_eq!(
        engine.roi(&ctv, &["a"], &zero).unwrap_err(),
        MmmError::ZeroCost("a".to_string())
    );

    let ten: CostMap = [("a", 10.0)].into_iter().collect();
    let roi = engine.roi(&ctv, &["a"], &ten).unwrap();
    assert_eq!(roi.get("a"), Some(&5.0));
}

#[test]
fn test_decomposition_missing_columns() {
    let table = linear_table(40);
    let coefficients: CoefficientMap = [("x1", 1.0), ("tv", 2.0), ("intercept", 0.0)]
        .into_iter()
        .collect();
    let engine = Contributions::new(&table, coefficients);
    assert_eq!(
        engine.decomposition().unwrap_err(),
        MmmError::MissingColumn(vec!["tv".to_string()])
    );
}

// ============================================================================
// Input validation and conditioning
// ============================================================================

#[test]
fn test_ragged_json_table_is_rejected_before_fit() {
    let x: Vec<String> = (0..40).map(|i| format!("{}.0", i)).collect();
    let y: Vec<String> = (0..10).map(|i| format!("{}.0", i)).collect();
    let json = format!(
        r#"{{"columns": [{{"name": "x", "values": [{}]}}, {{"name": "y", "values": [{}]}}], "n_rows": 40}}"#,
        x.join(", "),
        y.join(", ")
    );
    assert!(serde_json::from_str::<ObservationTable>(&json).is_err());
}

#[test]
fn test_spend_in_currency_units_fits() {
    let n = 104;
    let spend: Vec<f64> = (0..n).map(|i| 1e6 + 4e5 * (0.7 * i as f64).sin()).collect();
    let sat: Vec<f64> = (0..n).map(|i| 0.5 * (0.31 * i as f64).cos() + 0.5).collect();
    let y: Vec<f64> = (0..n)
        .map(|i| 5.0 + 2e-6 * spend[i] + 3.0 * sat[i] + 1e-3 * (1.3 * i as f64).cos())
        .collect();
    let table = ObservationTable::from_columns(vec![("spend", spend), ("sat", sat), ("y", y)]).unwrap();

    let mut model = LinearRegression::new(&table, "y", ["spend", "sat"]).unwrap();
    model.fit().unwrap();
    let coefficients = model.get_coefficients().unwrap();
    assert!((coefficients.get("spend").unwrap() - 2e-6).abs() < 1e-8);
    assert!((coefficients.get("sat").unwrap() - 3.0).abs() < 1e-2);
    assert!((coefficients.get("intercept").unwrap() - 5.0).abs() < 1e-2);
}

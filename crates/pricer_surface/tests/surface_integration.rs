//! End-to-end tests: configuration → nodal surface → volatility lookups.
//!
//! Set `RUST_LOG=pricer_surface=debug` to see construction and solver logs.

use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use pricer_surface::config::SurfaceConfig;
use pricer_surface::market_data::{
    DeltaSmileSurface, ErrorKind, GridVolatilitySurface, InterpolatedNodalSurface,
    MarketDataError, ParameterizedSurface, VolatilityAxes, VolatilitySurface,
};
use pricer_surface::math::interpolators::{DataBundle, Interpolator1D, LinearInterpolator};
use pricer_surface::risk::{volatility_sensitivities_by_bump, DEFAULT_BUMP};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn valuation() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 9, 30)
        .unwrap()
        .and_hms_opt(16, 0, 0)
        .unwrap()
}

const SWAPTION_CONFIG: &str = r#"
day_count = "ACT/365F"
axes = "expiry_tenor"

[x_axis]
interpolator = "Linear"
left_extrapolator = "Flat"
right_extrapolator = "Flat"

[y_axis]
interpolator = "NaturalCubicSpline"
left_extrapolator = "Linear"
right_extrapolator = "Flat"
"#;

const EXPIRY_DAYS: [i64; 4] = [182, 365, 730, 1825];
const TENORS: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

fn swaption_vol(expiry: f64, tenor: f64) -> f64 {
    0.0085 + 0.0004 * expiry - 0.0002 * tenor
}

fn swaption_surface() -> GridVolatilitySurface<f64> {
    let config = SurfaceConfig::from_toml_str(SWAPTION_CONFIG).unwrap();
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut zs = Vec::new();
    for &tenor in &TENORS {
        for &days in &EXPIRY_DAYS {
            let expiry = days as f64 / 365.0;
            xs.push(expiry);
            ys.push(tenor);
            zs.push(swaption_vol(expiry, tenor));
        }
    }
    let nodal = InterpolatedNodalSurface::new(
        "USD-SOFR-SWAPTION",
        &xs,
        &ys,
        &zs,
        config.grid_interpolator().unwrap(),
    )
    .unwrap();
    GridVolatilitySurface::new(valuation(), config.day_count, nodal, config.axes)
}

// ========================================
// Reference Properties
// ========================================

#[test]
fn test_linear_reference_properties() {
    let data = DataBundle::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]).unwrap();
    let interp = LinearInterpolator;

    assert_eq!(interp.interpolate(&data, 0.5).unwrap(), 0.5);
    for x in [0.0, 0.3, 1.0, 1.7] {
        assert_eq!(interp.first_derivative(&data, x).unwrap(), 1.0);
    }
    // Last node keeps the final slope, just past it the derivative is zero
    assert_eq!(interp.first_derivative(&data, 2.0).unwrap(), 1.0);
    assert_eq!(interp.first_derivative(&data, 2.0 + 1e-9).unwrap(), 0.0);
    assert_eq!(interp.interpolate(&data, 7.0).unwrap(), 2.0);
}

#[test]
fn test_surface_expiry_guard() {
    init_tracing();
    let surface = swaption_surface();

    let yesterday = valuation() - Duration::days(1);
    let err = surface.volatility(yesterday, 5.0, 0.03, 0.03).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DomainViolation);
    assert!(matches!(err, MarketDataError::ExpiredOption { .. }));

    let t: f64 = surface.relative_time(valuation()).unwrap();
    assert_eq!(t, 0.0);
    assert!(surface.volatility(valuation(), 5.0, 0.03, 0.03).is_ok());
}

#[test]
fn test_grid_reproduces_nodes_through_surface() {
    let surface = swaption_surface();
    for &days in &EXPIRY_DAYS {
        let expiry = valuation() + Duration::days(days);
        for &tenor in &TENORS {
            let vol = surface.volatility(expiry, tenor, 0.0, 0.0).unwrap();
            assert_relative_eq!(vol, swaption_vol(days as f64 / 365.0, tenor), epsilon = 1e-15);
        }
    }
}

// ========================================
// Sensitivities
// ========================================

#[test]
fn test_swaption_sensitivities_match_bumps() {
    init_tracing();
    let surface = swaption_surface();
    let expiry = valuation() + Duration::days(500);
    for tenor in [0.5, 3.0, 7.5, 12.0] {
        let analytic = surface
            .volatility_sensitivity(expiry, tenor, 0.0, 0.0)
            .unwrap();
        let bumped =
            volatility_sensitivities_by_bump(&surface, expiry, tenor, 0.0, 0.0, DEFAULT_BUMP)
                .unwrap();
        for (a, b) in analytic.node_weights.iter().zip(&bumped) {
            assert_relative_eq!(*a, *b, epsilon = 1e-7);
        }
    }
}

#[test]
fn test_delta_smile_end_to_end() {
    init_tracing();
    let config = SurfaceConfig::from_toml_str(
        r#"
        [solver]
        tolerance = 1e-13
        delta_min = 0.001
        delta_max = 0.999
        "#,
    )
    .unwrap();

    let deltas = [0.1, 0.25, 0.5, 0.75, 0.9];
    let quotes = [
        (0.25, [0.118, 0.106, 0.098, 0.101, 0.110]),
        (1.0, [0.125, 0.112, 0.104, 0.107, 0.117]),
    ];
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut zs = Vec::new();
    for (t, vols) in quotes {
        for (&d, &v) in deltas.iter().zip(vols.iter()) {
            xs.push(t);
            ys.push(d);
            zs.push(v);
        }
    }
    let nodal = InterpolatedNodalSurface::new(
        "EURUSD",
        &xs,
        &ys,
        &zs,
        config.grid_interpolator().unwrap(),
    )
    .unwrap();
    let smile = DeltaSmileSurface::new(
        valuation(),
        config.day_count,
        nodal,
        config.smile_config().unwrap(),
    )
    .unwrap();

    let expiry = valuation() + Duration::days(180);
    let forward = 1.1;
    let t: f64 = smile.relative_time(expiry).unwrap();

    let strike = smile.strike_from_delta(t, 0.3, forward).unwrap();
    assert_relative_eq!(
        smile.delta_from_strike(t, strike, forward).unwrap(),
        0.3,
        epsilon = 1e-10
    );

    let vol = smile.volatility(expiry, 0.0, strike, forward).unwrap();
    assert_relative_eq!(vol, smile.surface().z_value(t, 0.3).unwrap(), epsilon = 1e-10);

    let analytic = smile
        .volatility_sensitivity(expiry, 0.0, strike, forward)
        .unwrap();
    let bumped =
        volatility_sensitivities_by_bump(&smile, expiry, 0.0, strike, forward, DEFAULT_BUMP)
            .unwrap();
    assert_eq!(bumped.len(), smile.parameter_count());
    for (a, b) in analytic.node_weights.iter().zip(&bumped) {
        assert_relative_eq!(*a, *b, epsilon = 1e-6);
    }

    // Far out-of-the-money strike cannot be reached inside [0.001, 0.999]
    let err = smile.volatility(expiry, 0.0, 10.0, forward).unwrap_err();
    assert!(matches!(err, MarketDataError::DeltaOutOfRange { .. }));
}

// ========================================
// Configuration
// ========================================

#[test]
fn test_config_from_file() {
    let path = std::env::temp_dir().join(format!(
        "pricer_surface_config_{}.toml",
        std::process::id()
    ));
    std::fs::write(&path, SWAPTION_CONFIG).unwrap();
    let config = SurfaceConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.axes, VolatilityAxes::ExpiryTenor);
    assert_eq!(
        config.grid_interpolator().unwrap(),
        SurfaceConfig::from_toml_str(SWAPTION_CONFIG)
            .unwrap()
            .grid_interpolator()
            .unwrap()
    );
}

#[test]
fn test_surfaces_are_send_and_sync() {
    fn assert_send_sync<S: Send + Sync>() {}
    assert_send_sync::<GridVolatilitySurface<f64>>();
    assert_send_sync::<DeltaSmileSurface<f64>>();
    assert_send_sync::<InterpolatedNodalSurface<f64>>();
    assert_send_sync::<DataBundle<f64>>();
}

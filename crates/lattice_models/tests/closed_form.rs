//! Closed-form price and Greeks against reference values.
//!
//! S = 100, K = 110, τ = 0.5, r = ln 1.06, σ = ln 1.3.

use approx::assert_abs_diff_eq;
use lattice_core::traits::Priceable;
use lattice_core::types::PricingError;
use lattice_models::analytical::{SensitivityUnit, ThetaUnit};
use lattice_models::instruments::{
    Barrier, BarrierDirection, Contract, KnockInOption, KnockOutOption, OptionKind, VanillaOption,
};
use lattice_models::lattice::CalibrationModel;

const TOL: f64 = 1e-6;

fn option(kind: OptionKind) -> VanillaOption {
    let contract = Contract::builder("closed form")
        .rate(1.06_f64.ln())
        .volatility(1.3_f64.ln())
        .maturity(0.5)
        .strike(110.0)
        .kind(kind)
        .model(CalibrationModel::BlackScholes)
        .build()
        .unwrap();
    VanillaOption::new(contract)
}

#[test]
fn test_call_price_and_greeks() {
    let call = option(OptionKind::Call);
    assert_abs_diff_eq!(call.price(100.0, 1.0).unwrap(), 4.702224136412113, epsilon = TOL);
    assert_abs_diff_eq!(call.delta(100.0, 1.0).unwrap(), 0.39591111634279913, epsilon = TOL);
    assert_abs_diff_eq!(call.gamma(100.0, 1.0).unwrap(), 0.020767890417494102, epsilon = TOL);
    assert_abs_diff_eq!(
        call.vega(100.0, 1.0, SensitivityUnit::Absolute).unwrap(),
        27.243761469636485,
        epsilon = TOL
    );
    assert_abs_diff_eq!(
        call.vega(100.0, 1.0, SensitivityUnit::Percent).unwrap(),
        0.27243761469636485,
        epsilon = TOL
    );
    assert_abs_diff_eq!(
        call.theta(100.0, 1.0, ThetaUnit::Annual).unwrap(),
        -9.180726819469937,
        epsilon = TOL
    );
    assert_abs_diff_eq!(
        call.theta(100.0, 1.0, ThetaUnit::Daily).unwrap(),
        -0.025152676217725857,
        epsilon = TOL
    );
    assert_abs_diff_eq!(
        call.rho(100.0, 1.0, SensitivityUnit::Absolute).unwrap(),
        17.4444437489339,
        epsilon = TOL
    );
    assert_abs_diff_eq!(
        call.rho(100.0, 1.0, SensitivityUnit::Percent).unwrap(),
        0.174444437489339,
        epsilon = TOL
    );
}

#[test]
fn test_put_price_and_greeks() {
    let put = option(OptionKind::Put);
    assert_abs_diff_eq!(put.price(100.0, 1.0).unwrap(), 11.543668995711151, epsilon = TOL);
    assert_abs_diff_eq!(put.delta(100.0, 1.0).unwrap(), -0.6040888836572009, epsilon = TOL);
    assert_abs_diff_eq!(put.gamma(100.0, 1.0).unwrap(), 0.020767890417494102, epsilon = TOL);
    assert_abs_diff_eq!(
        put.vega(100.0, 1.0, SensitivityUnit::Percent).unwrap(),
        0.27243761469636485,
        epsilon = TOL
    );
    assert_abs_diff_eq!(
        put.theta(100.0, 1.0, ThetaUnit::Annual).unwrap(),
        -2.9551924851306124,
        epsilon = TOL
    );
    assert_abs_diff_eq!(
        put.theta(100.0, 1.0, ThetaUnit::Daily).unwrap(),
        -0.00809641776748113,
        epsilon = TOL
    );
    assert_abs_diff_eq!(
        put.rho(100.0, 1.0, SensitivityUnit::Percent).unwrap(),
        -0.35976278680715623,
        epsilon = TOL
    );
}

#[test]
fn test_greeks_bundle_matches_individual_calls() {
    let call = option(OptionKind::Call);
    let greeks = call.greeks(100.0, 100.0).unwrap();
    assert_abs_diff_eq!(greeks.price, call.price(100.0, 100.0).unwrap(), epsilon = 1e-12);
    assert_abs_diff_eq!(greeks.delta, call.delta(100.0, 100.0).unwrap(), epsilon = 1e-12);
    assert_abs_diff_eq!(
        greeks.vega,
        call.vega(100.0, 100.0, SensitivityUnit::Absolute).unwrap(),
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        greeks.theta,
        call.theta(100.0, 100.0, ThetaUnit::Annual).unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn test_default_units_follow_market_quoting() {
    assert_eq!(SensitivityUnit::default(), SensitivityUnit::Percent);
    assert_eq!(ThetaUnit::default(), ThetaUnit::Daily);
}

#[test]
fn test_closed_form_rejects_barriers() {
    let contract = option(OptionKind::Call).contract().clone();
    let barrier = Barrier::new(120.0, BarrierDirection::Up).unwrap();
    assert!(matches!(
        KnockOutOption::new(contract.clone(), barrier),
        Err(PricingError::Configuration(_))
    ));
    assert!(matches!(
        KnockInOption::new(contract, barrier),
        Err(PricingError::Configuration(_))
    ));
}

#[test]
fn test_invalid_option_kind_tag() {
    assert!(matches!(
        "digital".parse::<OptionKind>(),
        Err(PricingError::InvalidOptionKind(_))
    ));
}

//! Property-based tests over randomly generated contracts.

use lattice_core::traits::Priceable;
use lattice_models::instruments::{
    Barrier, BarrierDirection, Contract, KnockInOption, KnockOutOption, OptionKind, VanillaOption,
};
use lattice_models::lattice::{CalibrationModel, InductionStrategy};
use proptest::prelude::*;

fn model_strategy() -> impl Strategy<Value = CalibrationModel> {
    prop_oneof![
        Just(CalibrationModel::CoxRossRubinstein),
        Just(CalibrationModel::JarrowRudd),
        Just(CalibrationModel::Trigeorgis),
    ]
}

fn kind_strategy() -> impl Strategy<Value = OptionKind> {
    prop_oneof![Just(OptionKind::Call), Just(OptionKind::Put)]
}

fn direction_strategy() -> impl Strategy<Value = BarrierDirection> {
    prop_oneof![Just(BarrierDirection::Up), Just(BarrierDirection::Down)]
}

prop_compose! {
    fn contract_strategy()(
        model in model_strategy(),
        kind in kind_strategy(),
        rate in 0.0..0.05_f64,
        volatility in 0.1..0.5_f64,
        maturity in 0.25..2.0_f64,
        steps in 5usize..120,
        strike in 80.0..120.0_f64,
    ) -> Contract {
        Contract::builder("property")
            .rate(rate)
            .volatility(volatility)
            .maturity(maturity)
            .steps(steps)
            .strike(strike)
            .kind(kind)
            .model(model)
            .build()
            .unwrap()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_knock_in_plus_knock_out_is_vanilla(
        contract in contract_strategy(),
        level in 60.0..140.0_f64,
        direction in direction_strategy(),
        spot in 90.0..110.0_f64,
    ) {
        let barrier = Barrier::new(level, direction).unwrap();
        let vanilla = VanillaOption::new(contract.clone()).price(spot, 1.0).unwrap();
        let knock_out = KnockOutOption::new(contract.clone(), barrier)
            .unwrap()
            .price(spot, 1.0)
            .unwrap();
        let knock_in = KnockInOption::new(contract, barrier)
            .unwrap()
            .price(spot, 1.0)
            .unwrap();

        let tolerance = 1e-9 * vanilla.max(1.0);
        prop_assert!(
            (knock_in + knock_out - vanilla).abs() <= tolerance,
            "ki {} + ko {} != vanilla {}",
            knock_in,
            knock_out,
            vanilla
        );
        prop_assert!(knock_out >= 0.0);
        prop_assert!(knock_in >= -tolerance);
    }

    #[test]
    fn test_strategies_agree_bitwise(
        contract in contract_strategy(),
        level in 60.0..140.0_f64,
        direction in direction_strategy(),
        spot in 90.0..110.0_f64,
    ) {
        let barrier = Barrier::new(level, direction).unwrap();
        let option = KnockOutOption::new(contract, barrier).unwrap();
        let scalar = option
            .clone()
            .with_strategy(InductionStrategy::Scalar)
            .price(spot, 1.0)
            .unwrap();
        let vectorized = option
            .with_strategy(InductionStrategy::Vectorized)
            .price(spot, 1.0)
            .unwrap();
        prop_assert_eq!(scalar.to_bits(), vectorized.to_bits());
    }

    #[test]
    fn test_price_is_linear_in_shares(
        contract in contract_strategy(),
        shares in 1.0..1000.0_f64,
    ) {
        let option = VanillaOption::new(contract);
        let unit = option.price(100.0, 1.0).unwrap();
        let scaled = option.price(100.0, shares).unwrap();
        prop_assert!((scaled - shares * unit).abs() <= 1e-9 * scaled.abs().max(1.0));
    }
}

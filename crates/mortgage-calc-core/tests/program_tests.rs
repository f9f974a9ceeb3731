use mortgage_calc_core::programs::{
    calculate_program_costs, LoanProgram, ProgramConfig, ProgramCostInput, ProgramKind,
    VaFundingFeeUse,
};
use mortgage_calc_core::MortgageCalcError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn input(loan: Decimal, price: Decimal, program: LoanProgram) -> ProgramCostInput {
    ProgramCostInput {
        loan_amount: loan,
        home_price: price,
        ltv_pct: None,
        program,
    }
}

// ===========================================================================
// PMI threshold strictness
// ===========================================================================

#[test]
fn test_pmi_absent_at_eighty_ltv_conventional_and_jumbo() {
    let config = ProgramConfig::default();
    for program in [
        LoanProgram::Conventional { credit_score: 700 },
        LoanProgram::Jumbo { credit_score: 700 },
    ] {
        // 800k / 1M = exactly 80.00%
        let out = calculate_program_costs(&input(dec!(800000), dec!(1000000), program), &config)
            .unwrap();
        assert!(!out.result.mortgage_insurance_applies, "{program:?}");
        assert_eq!(out.result.monthly_mortgage_insurance, Decimal::ZERO);
    }
}

#[test]
fn test_pmi_present_at_eighty_point_zero_one_ltv() {
    let config = ProgramConfig::default();
    for program in [
        LoanProgram::Conventional { credit_score: 700 },
        LoanProgram::Jumbo { credit_score: 700 },
    ] {
        // 800,100 / 1M = 80.01%
        let out = calculate_program_costs(&input(dec!(800100), dec!(1000000), program), &config)
            .unwrap();
        assert!(out.result.mortgage_insurance_applies, "{program:?}");
        assert!(out.result.monthly_mortgage_insurance > Decimal::ZERO);
    }
}

// ===========================================================================
// FHA
// ===========================================================================

#[test]
fn test_fha_upfront_and_annual_mip() {
    let out = calculate_program_costs(
        &input(dec!(337750), dec!(350000), LoanProgram::Fha),
        &ProgramConfig::default(),
    )
    .unwrap();
    let b = &out.result;
    assert_eq!(b.program, ProgramKind::Fha);
    assert_eq!(b.upfront_fee_rolled_into_loan, dec!(5910.625));
    assert_eq!(b.adjusted_loan_amount, dec!(343660.625));
    // 343,660.625 * 0.55% / 12
    assert!((b.monthly_mortgage_insurance - dec!(157.51)).abs() < dec!(0.01));
}

#[test]
fn test_fha_mip_from_config() {
    let mut config = ProgramConfig::default();
    config.fha.annual_mip_pct = dec!(0.50);
    let out = calculate_program_costs(&input(dec!(240000), dec!(250000), LoanProgram::Fha), &config)
        .unwrap();
    let expected = out.result.adjusted_loan_amount * dec!(0.005) / dec!(12);
    assert_eq!(out.result.monthly_mortgage_insurance, expected);
}

// ===========================================================================
// VA
// ===========================================================================

#[test]
fn test_va_never_charges_monthly_mi() {
    let config = ProgramConfig::default();
    let uses = [
        VaFundingFeeUse::FirstUse,
        VaFundingFeeUse::SubsequentUse,
        VaFundingFeeUse::Exempt,
    ];
    for fee_use in uses {
        for loan in [dec!(0), dec!(100000), dec!(400000), dec!(500000), dec!(750000)] {
            let out = calculate_program_costs(
                &input(loan, dec!(500000), LoanProgram::Va { funding_fee_use: fee_use }),
                &config,
            )
            .unwrap();
            assert_eq!(out.result.monthly_mortgage_insurance, Decimal::ZERO);
        }
    }
}

#[test]
fn test_va_fee_on_base_loan() {
    let out = calculate_program_costs(
        &input(
            dec!(300000),
            dec!(320000),
            LoanProgram::Va {
                funding_fee_use: VaFundingFeeUse::SubsequentUse,
            },
        ),
        &ProgramConfig::default(),
    )
    .unwrap();
    assert_eq!(out.result.base_loan_amount, dec!(300000));
    assert_eq!(out.result.upfront_fee_rolled_into_loan, dec!(9900));
    assert_eq!(out.result.adjusted_loan_amount, dec!(309900));
}

// ===========================================================================
// Jumbo classification
// ===========================================================================

#[test]
fn test_jumbo_classification_respects_config_limit() {
    let mut config = ProgramConfig::default();
    let program = LoanProgram::Jumbo { credit_score: 760 };

    let out = calculate_program_costs(&input(dec!(820000), dec!(1100000), program), &config).unwrap();
    assert_eq!(out.result.is_jumbo, Some(true));

    config.conforming_loan_limit = dec!(832750);
    let out = calculate_program_costs(&input(dec!(820000), dec!(1100000), program), &config).unwrap();
    assert_eq!(out.result.is_jumbo, Some(false));
    assert!(out.warnings.iter().any(|w| w.contains("effectively a conventional")));
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = ProgramConfig::default();
    config.conforming_loan_limit = dec!(-1);
    let err = calculate_program_costs(&input(dec!(1), dec!(2), LoanProgram::Fha), &config)
        .unwrap_err();
    assert!(matches!(err, MortgageCalcError::InvalidConfig(_)));
}

#[test]
fn test_output_serializes_program_tag() {
    let out = calculate_program_costs(
        &input(dec!(300000), dec!(400000), LoanProgram::Conventional { credit_score: 745 }),
        &ProgramConfig::default(),
    )
    .unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["program"], "conventional");
    assert_eq!(json["result"]["credit_tier"], "740-759");
    assert!(json["result"].get("is_jumbo").is_none());
}

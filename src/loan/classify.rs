//! Static lookup tables for lender tiers and account behavior
//!
//! Every lookup is total: unmapped lender codes resolve to T3 (unknown lenders
//! are treated as highest-risk) and unmapped account-type codes resolve to
//! Fixed/Installment.

use super::{LenderTier, RepaymentType};

/// Lender org code -> tier
const ORG_TIER_TABLE: &[(u32, LenderTier)] = &[
    (11, LenderTier::T1), // Commercial bank
    (14, LenderTier::T1), // Housing savings bank
    (15, LenderTier::T1), // Foreign bank
    (52, LenderTier::T1), // Housing provident fund centre
    (12, LenderTier::T2), // Village bank
    (16, LenderTier::T2), // Finance company
    (21, LenderTier::T2), // Trust company
    (23, LenderTier::T2), // Auto finance
    (24, LenderTier::T2), // Consumer finance
    (31, LenderTier::T2), // Securities
    (41, LenderTier::T2), // Insurance
    (22, LenderTier::T3), // Financial leasing
    (25, LenderTier::T3), // Loan company
    (26, LenderTier::T3), // Asset management
    (51, LenderTier::T3), // Microcredit
    (53, LenderTier::T3), // Financing guarantee
    (54, LenderTier::T3), // Factoring
    (99, LenderTier::T3), // Other
];

/// Lender org code -> institution type
const ORG_NAME_TABLE: &[(u32, &str)] = &[
    (11, "Commercial bank"),
    (12, "Village bank"),
    (14, "Housing savings bank"),
    (15, "Foreign bank"),
    (16, "Finance company"),
    (21, "Trust company"),
    (22, "Financial leasing company"),
    (23, "Auto finance company"),
    (24, "Consumer finance company"),
    (25, "Loan company"),
    (26, "Asset management company"),
    (31, "Securities company"),
    (41, "Insurance company"),
    (51, "Microcredit company"),
    (52, "Housing provident fund centre"),
    (53, "Financing guarantee company"),
    (54, "Factoring company"),
    (99, "Other institution"),
];

/// Account-type code -> repayment behavior
const ACCOUNT_TYPE_TABLE: &[(&str, RepaymentType)] = &[
    ("R1", RepaymentType::Revolving),
    ("R2", RepaymentType::Revolving),
    ("R4", RepaymentType::Revolving),
    ("D1", RepaymentType::Fixed),
    ("R3", RepaymentType::Fixed),
];

/// Default nominal annual rates when a record carries none
const DEFAULT_RATES: [(LenderTier, f64); 3] = [
    (LenderTier::T1, 0.08),
    (LenderTier::T2, 0.18),
    (LenderTier::T3, 0.24),
];

/// Resolve the lender tier for an org code (unknown codes -> T3)
pub fn tier_for_org_code(org_code: u32) -> LenderTier {
    ORG_TIER_TABLE
        .iter()
        .find(|(code, _)| *code == org_code)
        .map(|(_, tier)| *tier)
        .unwrap_or(LenderTier::T3)
}

/// Resolve repayment behavior for an account-type code (unknown codes -> Fixed)
pub fn repayment_type_for_code(account_type_code: &str) -> RepaymentType {
    let code = account_type_code.trim();
    ACCOUNT_TYPE_TABLE
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, kind)| *kind)
        .unwrap_or(RepaymentType::Fixed)
}

/// Fallback annual rate for a tier
pub fn default_annual_rate(tier: LenderTier) -> f64 {
    DEFAULT_RATES
        .iter()
        .find(|(t, _)| *t == tier)
        .map(|(_, rate)| *rate)
        .unwrap_or(0.24)
}

/// Human-readable institution type for an org code
pub fn lender_type_name(org_code: u32) -> &'static str {
    ORG_NAME_TABLE
        .iter()
        .find(|(code, _)| *code == org_code)
        .map(|(_, name)| *name)
        .unwrap_or("Unknown institution")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_org_codes() {
        assert_eq!(tier_for_org_code(11), LenderTier::T1);
        assert_eq!(tier_for_org_code(52), LenderTier::T1);
        assert_eq!(tier_for_org_code(12), LenderTier::T2);
        assert_eq!(tier_for_org_code(24), LenderTier::T2);
        assert_eq!(tier_for_org_code(51), LenderTier::T3);
        assert_eq!(tier_for_org_code(99), LenderTier::T3);
    }

    #[test]
    fn test_unknown_org_code_is_highest_risk() {
        assert_eq!(tier_for_org_code(0), LenderTier::T3);
        assert_eq!(tier_for_org_code(77), LenderTier::T3);
        assert_eq!(lender_type_name(77), "Unknown institution");
    }

    #[test]
    fn test_account_types() {
        assert_eq!(repayment_type_for_code("R1"), RepaymentType::Revolving);
        assert_eq!(repayment_type_for_code(" r4 "), RepaymentType::Revolving);
        assert_eq!(repayment_type_for_code("R3"), RepaymentType::Fixed);
        assert_eq!(repayment_type_for_code("D1"), RepaymentType::Fixed);
        assert_eq!(repayment_type_for_code("ZZ"), RepaymentType::Fixed);
        assert_eq!(repayment_type_for_code(""), RepaymentType::Fixed);
    }

    #[test]
    fn test_default_rates() {
        assert_eq!(default_annual_rate(LenderTier::T1), 0.08);
        assert_eq!(default_annual_rate(LenderTier::T2), 0.18);
        assert_eq!(default_annual_rate(LenderTier::T3), 0.24);
    }
}

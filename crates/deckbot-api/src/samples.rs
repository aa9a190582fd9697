//! Built-in company list for runs that skip the company list request

use deckbot_core::CompanyRef;

const SAMPLE_COMPANIES: &[(&str, &str)] = &[
    ("Apple", "58080ff4ebbf470003ca9f7b"),
    ("Facebook", "58153a9ac12a6e000f7c2bea"),
    ("Accenture", "5809bcf577b61a00034adacf"),
    ("Amazon", "5809bc2777b61a00034ada25"),
    ("Heineken", "584d79ba083592000413cf7a"),
    ("Salesforce", "5809dc87557fb000039bb28a"),
    ("A.G. Barr", "5b588a57deaaf8000f3f4a4e"),
    ("Delta Air Lines", "5809bb4b77b61a00034ad967"),
];

/// Companies known to have complete Databook coverage
pub fn sample_companies() -> Vec<CompanyRef> {
    SAMPLE_COMPANIES
        .iter()
        .map(|(name, id)| CompanyRef::new(*id, *name))
        .collect()
}

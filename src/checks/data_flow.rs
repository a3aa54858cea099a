//! Data flow documentation; exempt for the low baseline.

use super::CheckContext;
use crate::error::CheckError;
use crate::models::{Baseline, Issue, IssueCode, Severity};

pub fn check(ctx: &CheckContext<'_>) -> Result<Vec<Issue>, CheckError> {
    let (severity, wording) = match ctx.baseline {
        Baseline::Low => return Ok(Vec::new()),
        Baseline::Moderate => (Severity::Warning, "recommended"),
        Baseline::High => (Severity::Error, "required"),
    };

    let data_flow = ctx.ssp().field("system-characteristics")?.field("data-flow")?;
    if data_flow.is_truthy() {
        return Ok(Vec::new());
    }
    Ok(vec![Issue::new(
        severity,
        IssueCode::MissingDataFlow,
        format!(
            "Data flow documentation is {wording} for {} baseline",
            ctx.baseline.title()
        ),
    )
    .at(data_flow.path())
    .for_baseline(ctx.baseline)])
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{complete_ssp, without};
    use super::*;
    use crate::models::BaselineRequirements;

    fn run(baseline: Baseline) -> Vec<Issue> {
        let doc = without(complete_ssp(&[]), "system-characteristics.data-flow");
        let reqs = BaselineRequirements::EMPTY;
        check(&CheckContext::new(&doc, baseline, &reqs)).unwrap()
    }

    #[test]
    fn test_low_is_exempt() {
        assert!(run(Baseline::Low).is_empty());
    }

    #[test]
    fn test_moderate_warns_and_high_errors() {
        let moderate = run(Baseline::Moderate);
        assert_eq!(moderate.len(), 1);
        assert_eq!(moderate[0].code, IssueCode::MissingDataFlow);
        assert_eq!(moderate[0].severity, Severity::Warning);

        let high = run(Baseline::High);
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].code, IssueCode::MissingDataFlow);
        assert_eq!(high[0].severity, Severity::Error);
        assert!(high[0].message.contains("required for High"));
    }

    #[test]
    fn test_present_data_flow_passes() {
        let doc = complete_ssp(&[]);
        let reqs = BaselineRequirements::EMPTY;
        assert!(check(&CheckContext::new(&doc, Baseline::High, &reqs)).unwrap().is_empty());
    }
}

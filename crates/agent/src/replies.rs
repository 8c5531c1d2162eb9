use loanbot_core::{Eligibility, ScoringResult};
use tera::{Context, Tera};

pub const ELIGIBLE_MESSAGE: &str =
    "Good news — based on the information provided, you appear eligible for the loan.";
pub const NOT_ELIGIBLE_MESSAGE: &str =
    "Based on the information provided, you are currently not eligible for the loan.";
pub const UNDETERMINED_MESSAGE: &str =
    "Our model could not determine eligibility right now. Our team will review your application.";
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "Sorry — we couldn't reach the eligibility service. Your details have been saved and will be processed by our team.";
pub const FOLLOW_UP_MESSAGE: &str =
    "If you'd like, I can connect you to a human agent or start another check.";

/// Host response template confirming a restart.
pub const RESTARTED_RESPONSE: &str = "utter_restarted";

const DECISION_TEMPLATE: &str = "decision.txt";
const DECISION_SOURCE: &str =
    "{{ headline }}{% if confidence is defined %} (Confidence: {{ confidence }}%){% endif %}";

/// Renders the reply for a scoring decision.
#[derive(Clone, Debug)]
pub struct ReplyTemplates {
    tera: Tera,
}

impl ReplyTemplates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(DECISION_TEMPLATE, DECISION_SOURCE)?;
        Ok(Self { tera })
    }

    /// Decisions carry a confidence suffix when the service sent a score;
    /// an undetermined outcome never does.
    pub fn decision(&self, result: &ScoringResult) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("headline", headline(result.eligibility));
        match (result.eligibility, result.confidence_pct()) {
            (Eligibility::Eligible | Eligibility::NotEligible, Some(confidence)) => {
                context.insert("confidence", &confidence);
            }
            _ => {}
        }
        self.tera.render(DECISION_TEMPLATE, &context)
    }
}

pub fn headline(eligibility: Eligibility) -> &'static str {
    match eligibility {
        Eligibility::Eligible => ELIGIBLE_MESSAGE,
        Eligibility::NotEligible => NOT_ELIGIBLE_MESSAGE,
        Eligibility::Unknown => UNDETERMINED_MESSAGE,
    }
}

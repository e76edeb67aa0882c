use crate::payload::{ReportPayload, ReportPeriod};
use anyhow::Result;

/// Where raw monthly payloads come from. Implementations only retrieve; they
/// never reshape the data.
pub trait ReportSource {
    fn fetch(&self, period: &ReportPeriod) -> Result<ReportPayload>;
}

impl<T: ReportSource + ?Sized> ReportSource for Box<T> {
    fn fetch(&self, period: &ReportPeriod) -> Result<ReportPayload> {
        (**self).fetch(period)
    }
}

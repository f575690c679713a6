use serde::{Deserialize, Serialize};
use std::fmt;

/// Draw `n_datasets` independent samples of `sample_size` cells from a job's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenSamples {
    pub sample_size: u32,
    #[serde(rename = "nDatasets")]
    pub n_datasets: u32,
}

/// Dimensionality reduction of the simulated cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimRed {
    pub perplexity: u32,
}

/// Technical dropout applied to every sampled dataset.
///
/// A value below the `drop_cutoff` quantile of its gene is zeroed with probability
/// `drop_prob`. Entries with `dropout: false` are kept in the document but inactive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dropouts {
    pub dropout: bool,
    pub drop_cutoff: f64,
    pub drop_prob: f64,
}

/// Pseudotime inference on the simulated cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slingshot {
    pub perplexity: u32,
}

/// The `post_processing` section: step name to its list of parameter records.
///
/// Every step is optional; an absent step is inactive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostProcessing {
    #[serde(rename = "GenSamples", default, skip_serializing_if = "Option::is_none")]
    pub gen_samples: Option<Vec<GenSamples>>,
    #[serde(rename = "DimRed", default, skip_serializing_if = "Option::is_none")]
    pub dim_red: Option<Vec<DimRed>>,
    #[serde(rename = "Dropouts", default, skip_serializing_if = "Option::is_none")]
    pub dropouts: Option<Vec<Dropouts>>,
    #[serde(rename = "Slingshot", default, skip_serializing_if = "Option::is_none")]
    pub slingshot: Option<Vec<Slingshot>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    GenSamples,
    DimRed,
    Dropouts,
    Slingshot,
}

impl StepKind {
    pub fn key(&self) -> &'static str {
        match self {
            StepKind::GenSamples => "GenSamples",
            StepKind::DimRed => "DimRed",
            StepKind::Dropouts => "Dropouts",
            StepKind::Slingshot => "Slingshot",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl PostProcessing {
    pub fn gen_samples(&self) -> &[GenSamples] {
        self.gen_samples.as_deref().unwrap_or_default()
    }

    pub fn dim_red(&self) -> &[DimRed] {
        self.dim_red.as_deref().unwrap_or_default()
    }

    pub fn dropouts(&self) -> &[Dropouts] {
        self.dropouts.as_deref().unwrap_or_default()
    }

    pub fn slingshot(&self) -> &[Slingshot] {
        self.slingshot.as_deref().unwrap_or_default()
    }

    /// Dropout entries that are switched on.
    pub fn active_dropouts(&self) -> impl Iterator<Item = &Dropouts> {
        self.dropouts().iter().filter(|d| d.dropout)
    }

    /// Steps with at least one active parameter record, in execution order.
    pub fn active_steps(&self) -> Vec<StepKind> {
        let mut steps = Vec::new();
        if !self.gen_samples().is_empty() {
            steps.push(StepKind::GenSamples);
        }
        if self.active_dropouts().next().is_some() {
            steps.push(StepKind::Dropouts);
        }
        if !self.dim_red().is_empty() {
            steps.push(StepKind::DimRed);
        }
        if !self.slingshot().is_empty() {
            steps.push(StepKind::Slingshot);
        }
        steps
    }
}

use super::literal::{LiteralError, parse_number_list, parse_string_list};
use indexmap::IndexMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

const GENES_COLUMN: &str = "Genes";
const VALUES_COLUMN: &str = "Values";

#[derive(Debug, Error)]
pub enum InitialConditionsError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Malformed initial-condition table: {0}")]
    Csv(#[from] csv::Error),
    #[error("Initial-condition table has no '{0}' column")]
    MissingColumn(&'static str),
    #[error("Initial-condition table has no data rows")]
    Empty,
    #[error("Invalid list in column '{column}': {source}")]
    Literal {
        column: &'static str,
        source: LiteralError,
    },
    #[error("Initial-condition table lists {genes} gene(s) but {values} value(s)")]
    LengthMismatch { genes: usize, values: usize },
}

/// Initial expression values for a subset of genes.
///
/// Read from a tab-separated table with `Genes` and `Values` columns, each cell
/// holding a list literal. Only the first data row is used. Genes not listed here
/// start from the engine's low default level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitialConditions {
    values: IndexMap<String, f64>,
}

impl InitialConditions {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InitialConditionsError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| InitialConditionsError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::read_from(file)
    }

    pub fn read_from(reader: impl Read) -> Result<Self, InitialConditionsError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(InitialConditionsError::MissingColumn(name))
        };
        let genes_idx = column(GENES_COLUMN)?;
        let values_idx = column(VALUES_COLUMN)?;

        let record = reader
            .records()
            .next()
            .ok_or(InitialConditionsError::Empty)??;

        let genes = parse_string_list(record.get(genes_idx).unwrap_or_default()).map_err(
            |source| InitialConditionsError::Literal {
                column: GENES_COLUMN,
                source,
            },
        )?;
        let values = parse_number_list(record.get(values_idx).unwrap_or_default()).map_err(
            |source| InitialConditionsError::Literal {
                column: VALUES_COLUMN,
                source,
            },
        )?;

        if genes.len() != values.len() {
            return Err(InitialConditionsError::LengthMismatch {
                genes: genes.len(),
                values: values.len(),
            });
        }

        let mut map = IndexMap::with_capacity(genes.len());
        for (gene, value) in genes.into_iter().zip(values) {
            if map.insert(gene.clone(), value).is_some() {
                warn!(
                    "Gene '{}' listed more than once in initial conditions; keeping the last value.",
                    gene
                );
            }
        }
        Ok(Self { values: map })
    }

    pub fn get(&self, gene: &str) -> Option<f64> {
        self.values.get(gene).copied()
    }

    pub fn genes(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(g, v)| (g.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

const GENE_COLUMN: &str = "Gene";
const RULE_COLUMN: &str = "Rule";
const OPERATORS: [&str; 3] = ["and", "or", "not"];

#[derive(Debug, Error)]
pub enum ModelDefinitionError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Malformed model definition table: {0}")]
    Csv(#[from] csv::Error),
    #[error("Model definition has no '{0}' column")]
    MissingColumn(&'static str),
    #[error("Model definition defines no genes")]
    Empty,
    #[error("Row {row} of the model definition has an empty gene name")]
    EmptyGene { row: usize },
    #[error("Gene '{0}' is defined more than once")]
    DuplicateGene(String),
}

/// The Boolean update rule of one gene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRule {
    pub gene: String,
    /// Rule text as written, e.g. `Fgf8 and not Emx2`.
    pub rule: String,
    /// Genes referenced by the rule, in order of first appearance.
    pub regulators: Vec<String>,
}

/// The structural part of a Boolean model: one rule per gene.
///
/// Rules are kept as text. Only the set of regulators is extracted, which is enough
/// to cross-check the other inputs of a job against the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelDefinition {
    rules: Vec<GeneRule>,
}

impl ModelDefinition {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelDefinitionError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ModelDefinitionError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::read_from(file)
    }

    pub fn read_from(reader: impl Read) -> Result<Self, ModelDefinitionError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(ModelDefinitionError::MissingColumn(name))
        };
        let gene_idx = column(GENE_COLUMN)?;
        let rule_idx = column(RULE_COLUMN)?;

        let mut seen = HashSet::new();
        let mut rules = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let gene = record.get(gene_idx).unwrap_or_default().trim();
            let rule = record.get(rule_idx).unwrap_or_default().trim();
            if gene.is_empty() {
                if rule.is_empty() {
                    continue;
                }
                return Err(ModelDefinitionError::EmptyGene { row: i + 1 });
            }
            if !seen.insert(gene.to_string()) {
                return Err(ModelDefinitionError::DuplicateGene(gene.to_string()));
            }
            rules.push(GeneRule {
                gene: gene.to_string(),
                rule: rule.to_string(),
                regulators: extract_regulators(rule),
            });
        }

        if rules.is_empty() {
            return Err(ModelDefinitionError::Empty);
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[GeneRule] {
        &self.rules
    }

    pub fn genes(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.gene.as_str())
    }

    pub fn contains(&self, gene: &str) -> bool {
        self.rules.iter().any(|r| r.gene == gene)
    }

    /// Regulators referenced by some rule but never given a rule of their own.
    pub fn undefined_regulators(&self) -> Vec<&str> {
        let mut missing = Vec::new();
        for regulator in self.rules.iter().flat_map(|r| r.regulators.iter()) {
            if !self.contains(regulator) && !missing.contains(&regulator.as_str()) {
                missing.push(regulator.as_str());
            }
        }
        missing
    }
}

fn extract_regulators(rule: &str) -> Vec<String> {
    let mut regulators: Vec<String> = Vec::new();
    for token in rule.split(|c: char| !(c.is_alphanumeric() || c == '_')) {
        if token.is_empty() || OPERATORS.contains(&token) {
            continue;
        }
        if token.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if !regulators.iter().any(|r| r == token) {
            regulators.push(token.to_string());
        }
    }
    regulators
}

#[cfg(test)]
mod tests {
    use super::*;

    const MCAD: &str = "Gene\tRule\n\
        Fgf8\tFgf8 and not Emx2 and Sp8\n\
        Emx2\tnot Fgf8 and not Pax6 and not Sp8\n\
        Pax6\tnot Emx2 and Sp8 and not Coup\n\
        Sp8\tFgf8 and not Emx2\n\
        Coup\tnot (Fgf8 or Sp8)\n";

    #[test]
    fn reads_rules_and_regulators() {
        let model = ModelDefinition::read_from(MCAD.as_bytes()).unwrap();
        assert_eq!(
            model.genes().collect::<Vec<_>>(),
            vec!["Fgf8", "Emx2", "Pax6", "Sp8", "Coup"]
        );
        assert_eq!(model.rules()[0].regulators, vec!["Fgf8", "Emx2", "Sp8"]);
        assert_eq!(model.rules()[4].regulators, vec!["Fgf8", "Sp8"]);
        assert!(model.undefined_regulators().is_empty());
    }

    #[test]
    fn reports_regulators_without_rules() {
        let table = "Gene\tRule\na\tb or c\nb\ta\n";
        let model = ModelDefinition::read_from(table.as_bytes()).unwrap();
        assert_eq!(model.undefined_regulators(), vec!["c"]);
    }

    #[test]
    fn skips_blank_rows() {
        let table = "Gene\tRule\na\ta\n\t\nb\tnot a\n";
        let model = ModelDefinition::read_from(table.as_bytes()).unwrap();
        assert_eq!(model.rules().len(), 2);
    }

    #[test]
    fn rejects_duplicate_genes() {
        let table = "Gene\tRule\na\ta\na\tnot a\n";
        assert!(matches!(
            ModelDefinition::read_from(table.as_bytes()),
            Err(ModelDefinitionError::DuplicateGene(g)) if g == "a"
        ));
    }

    #[test]
    fn rejects_rule_without_gene() {
        let table = "Gene\tRule\n\tnot a\n";
        assert!(matches!(
            ModelDefinition::read_from(table.as_bytes()),
            Err(ModelDefinitionError::EmptyGene { row: 1 })
        ));
    }

    #[test]
    fn rejects_empty_or_headerless_tables() {
        assert!(matches!(
            ModelDefinition::read_from("Gene\tRule\n".as_bytes()),
            Err(ModelDefinitionError::Empty)
        ));
        assert!(matches!(
            ModelDefinition::read_from("Name\tRule\na\ta\n".as_bytes()),
            Err(ModelDefinitionError::MissingColumn("Gene"))
        ));
    }
}

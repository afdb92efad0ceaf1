use crate::registry::GenericAdapter;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct AdapterRow {
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Version")]
    pub version: String,
    #[tabled(rename = "Group")]
    pub group: String,
    #[tabled(rename = "Key")]
    pub key: String,
}

impl From<&GenericAdapter> for AdapterRow {
    fn from(adapter: &GenericAdapter) -> Self {
        let gvk = adapter.gvk();
        Self {
            kind: gvk.kind.clone(),
            version: gvk.version.clone(),
            group: if gvk.group.is_empty() { "(core)".to_string() } else { gvk.group.clone() },
            key: gvk.canonical(),
        }
    }
}

/// Render adapters as a table sorted by canonical key; empty input renders nothing.
pub fn adapter_table(adapters: &[GenericAdapter]) -> String {
    if adapters.is_empty() {
        return String::new();
    }

    let mut rows: Vec<AdapterRow> = adapters.iter().map(AdapterRow::from).collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    Table::new(&rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExternalFramework;
    use crate::registry::FrameworkRegistry;

    #[test]
    fn test_adapter_table() {
        let mut registry = FrameworkRegistry::new();
        registry
            .load(vec![ExternalFramework::new("Job.v1.batch"), ExternalFramework::new("Pod.v1.")])
            .unwrap();

        let table = adapter_table(&registry.list_all());
        assert!(table.contains("Kind"));
        assert!(table.contains("(core)"));
        assert!(table.contains("batch/v1, Kind=Job"));
        assert!(table.find("/v1, Kind=Pod").unwrap() < table.find("batch/v1, Kind=Job").unwrap());
    }

    #[test]
    fn test_empty_table() {
        assert!(adapter_table(&[]).is_empty());
    }
}

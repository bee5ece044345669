//! Random hierarchical datasets for demos and load testing.
//!
//! Generation is deterministic for a given [`SampleConfig`], seed included.

use crate::column::ColumnSpec;
use crate::document::DatasetDocument;
use crate::node::{Node, ACTIONS_FIELD};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const RESOURCE_TYPES: &[&str] = &[
    "Application", "Service", "Task", "Database", "Redis", "Storage", "Bucket", "Volume",
];

const STATUSES: &[&str] = &["Active", "Inactive", "Pending", "Processing", "Provisioning"];

const ORCHESTRATIONS: &[&str] = &["ECS", "EKS", "Lambda", "EC2"];

const NAME_STEMS: &[&str] = &[
    "web", "api", "auth", "billing", "cache", "search", "worker", "gateway", "ledger", "media",
];

const MONTHS: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleConfig {
    pub roots: usize,
    /// Deepest level generated below the top level.
    pub depth: usize,
    pub fanout_min: usize,
    pub fanout_max: usize,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            roots: 25,
            depth: 2,
            fanout_min: 0,
            fanout_max: 4,
            seed: 42,
        }
    }
}

/// Column declarations matching the generated fields.
pub fn sample_columns() -> Vec<ColumnSpec> {
    let spec = |key: &str, title: &str, filterable: bool, editable: bool| ColumnSpec {
        key: key.to_string(),
        title: Some(title.to_string()),
        sortable: None,
        filterable,
        render: None,
        editable,
    };
    let mut status = spec("status", "Status", true, false);
    status.render = Some("status_badge".to_string());
    vec![
        spec("resourceType", "Resource Type", true, false),
        spec("name", "Name", false, true),
        spec("dateTime", "Date & Time", false, true),
        status,
        spec("orchestration", "Orchestration", true, true),
        spec("value", "Value", false, false),
    ]
}

/// Generates a complete dataset document.
pub fn generate_document(config: &SampleConfig) -> DatasetDocument {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut next_id: i64 = 1;
    let data = (0..config.roots)
        .map(|_| generate_node(&mut rng, config, 0, &mut next_id))
        .collect();

    let mut doc = DatasetDocument::new(sample_columns(), data);
    doc.searchable_columns = ["resourceType", "name", "dateTime", "orchestration"]
        .iter()
        .map(|key| key.to_string())
        .collect();
    doc
}

fn generate_node(rng: &mut StdRng, config: &SampleConfig, level: usize, next_id: &mut i64) -> Node {
    let id = *next_id;
    *next_id += 1;

    let stem = NAME_STEMS[rng.gen_range(0..NAME_STEMS.len())];
    let resource_type = RESOURCE_TYPES[rng.gen_range(0..RESOURCE_TYPES.len())];
    let date_time = format!(
        "{:02}-{}-2024, {:02}:{:02} {}",
        rng.gen_range(1..=28),
        MONTHS[rng.gen_range(0..MONTHS.len())],
        rng.gen_range(1..=12),
        rng.gen_range(0..12) * 5,
        if rng.gen_bool(0.5) { "AM" } else { "PM" },
    );

    let mut node = Node::new(id)
        .with_field("resourceType", resource_type)
        .with_field("name", format!("{}-{}-{}", stem, resource_type.to_lowercase(), id))
        .with_field("dateTime", date_time)
        .with_field("status", STATUSES[rng.gen_range(0..STATUSES.len())])
        .with_field("orchestration", ORCHESTRATIONS[rng.gen_range(0..ORCHESTRATIONS.len())])
        .with_field("value", rng.gen_range(0..10_000));
    if rng.gen_bool(0.1) {
        node = node.with_field(ACTIONS_FIELD, false);
    }

    if level < config.depth && config.fanout_max > 0 {
        let lo = config.fanout_min.min(config.fanout_max);
        let count = rng.gen_range(lo..=config.fanout_max);
        let children = (0..count)
            .map(|_| generate_node(rng, config, level + 1, next_id))
            .collect();
        node = node.with_children(children);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeIndex;

    #[test]
    fn test_same_seed_same_document() {
        let config = SampleConfig::default();
        assert_eq!(generate_document(&config), generate_document(&config));
    }

    #[test]
    fn test_shape_respects_config() {
        let config = SampleConfig {
            roots: 10,
            depth: 3,
            fanout_min: 2,
            fanout_max: 2,
            seed: 7,
        };
        let doc = generate_document(&config);
        let index = TreeIndex::build(&doc.data);

        assert_eq!(doc.data.len(), 10);
        assert_eq!(index.max_depth(), 3);
        // 10 * (1 + 2 + 4 + 8)
        assert_eq!(index.node_count(), 150);
    }

    #[test]
    fn test_ids_are_unique() {
        let doc = generate_document(&SampleConfig::default());
        let index = TreeIndex::build(&doc.data);
        let mut count = 0;
        let mut stack: Vec<&Node> = doc.data.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        assert_eq!(index.node_count(), count);
        assert_eq!(doc.columns.len(), 6);
    }

    #[test]
    fn test_status_is_not_editable() {
        let editable: Vec<String> = sample_columns()
            .into_iter()
            .filter(|spec| spec.editable)
            .map(|spec| spec.key)
            .collect();
        assert_eq!(editable, vec!["name", "dateTime", "orchestration"]);
    }
}

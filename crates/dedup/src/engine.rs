use std::collections::{BTreeMap, HashMap};

use crate::config::KeepPolicy;
use crate::key::KeySpec;
use crate::model::{
    DedupResult, DroppedRecord, DuplicateGroup, NormalizedKey, Record, RecordSet, RunMeta,
    RunSummary, UnprocessableRecord,
};

/// Classify every record in one left-to-right pass. The earliest record with
/// a given key wins; later records with the same key are dropped. A record no
/// key can be built for goes to the unprocessable bucket and the pass
/// continues. Empty input yields an empty result with zero counts.
pub fn run(spec: &KeySpec, keep: KeepPolicy, input: &RecordSet) -> DedupResult {
    let indices = spec.column_indices(&input.headers);

    let mut first_seen: HashMap<NormalizedKey, usize> = HashMap::new();
    let mut groups: BTreeMap<NormalizedKey, Vec<usize>> = BTreeMap::new();
    let mut kept: Vec<(Record, NormalizedKey)> = Vec::new();
    let mut dropped: Vec<DroppedRecord> = Vec::new();
    let mut unprocessable: Vec<UnprocessableRecord> = Vec::new();

    for record in &input.records {
        let key = match spec.build_key(&indices, record) {
            Ok(key) => key,
            Err(missing) => {
                unprocessable.push(UnprocessableRecord {
                    record: record.clone(),
                    column: missing.column,
                });
                continue;
            }
        };

        groups.entry(key.clone()).or_default().push(record.row);

        if let Some(&first_row) = first_seen.get(&key) {
            dropped.push(DroppedRecord {
                record: record.clone(),
                key,
                first_row,
            });
        } else {
            first_seen.insert(key.clone(), record.row);
            kept.push((record.clone(), key));
        }
    }

    // Under keep policy `none`, first occurrences of duplicated keys are
    // reclassified after the pass; the single traversal above stays intact.
    let kept: Vec<Record> = match keep {
        KeepPolicy::First => kept.into_iter().map(|(record, _)| record).collect(),
        KeepPolicy::None => {
            let mut survivors = Vec::new();
            for (record, key) in kept {
                let count = groups.get(&key).map_or(1, Vec::len);
                if count > 1 {
                    let first_row = record.row;
                    dropped.push(DroppedRecord { record, key, first_row });
                } else {
                    survivors.push(record);
                }
            }
            dropped.sort_by_key(|d| d.record.row);
            survivors
        }
    };

    // Largest groups first; BTreeMap iteration fixes the order of ties.
    let mut dup_groups: Vec<DuplicateGroup> = groups
        .into_iter()
        .filter(|(_, rows)| rows.len() > 1)
        .map(|(key, rows)| DuplicateGroup { key, count: rows.len(), rows })
        .collect();
    dup_groups.sort_by(|a, b| b.count.cmp(&a.count));

    let summary = RunSummary {
        total: input.records.len(),
        kept: kept.len(),
        duplicates: dropped.len(),
        unprocessable: unprocessable.len(),
        duplicate_groups: dup_groups.len(),
    };

    DedupResult {
        meta: RunMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            keep,
        },
        summary,
        kept,
        dropped,
        unprocessable,
        groups: dup_groups,
    }
}

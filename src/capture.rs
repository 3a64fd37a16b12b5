use std::collections::HashMap;

use crate::ast::RegexNode;

/// Per-call record of what each capture group produced.
///
/// Group ids are handed out from 1 in the order groups are first entered. A
/// group is identified by its node's address, so a group inside a repetition
/// keeps its id and each run overwrites the previous value.
#[derive(Debug)]
pub struct CaptureContext {
    next_id: u32,
    ids: HashMap<*const RegexNode, u32>,
    values: HashMap<u32, String>,
}

impl Default for CaptureContext {
    fn default() -> Self {
        Self {
            next_id: 1,
            ids: HashMap::new(),
            values: HashMap::new(),
        }
    }
}

impl CaptureContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id of `group`, assigning the next free one on first sight.
    pub fn id_for(&mut self, group: &RegexNode) -> u32 {
        let next_id = &mut self.next_id;
        *self.ids.entry(group as *const RegexNode).or_insert_with(|| {
            let id = *next_id;
            *next_id += 1;
            log::trace!("capture group at offset {} is group {}", group.offset, id);
            id
        })
    }

    pub fn record(&mut self, id: u32, value: String) {
        self.values.insert(id, value);
    }

    /// The latest value of group `id`; empty if the group never ran.
    pub fn resolve(&self, id: u32) -> &str {
        self.values.get(&id).map(String::as_str).unwrap_or("")
    }
}

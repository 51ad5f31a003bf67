use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One contig record. Only `sequence` is interpreted; every other field is
/// carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contig {
    pub sequence: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contig {
    pub fn new(sequence: impl Into<String>) -> Self {
        Self {
            sequence: sequence.into(),
            extra: Map::new(),
        }
    }

    /// Sequence length in characters.
    pub fn length(&self) -> u64 {
        self.sequence.chars().count() as u64
    }
}

/// In-memory copy of a workspace ContigSet object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContigSet {
    pub contigs: Vec<Contig>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContigSet {
    pub fn from_value(data: Value) -> Result<Self, String> {
        if !data.is_object() {
            return Err("ContigSet data must be a JSON object".to_string());
        }
        serde_json::from_value(data).map_err(|error| error.to_string())
    }

    pub fn into_value(self) -> Value {
        let mut object = self.extra;
        let contigs = self
            .contigs
            .into_iter()
            .map(|contig| {
                let mut fields = contig.extra;
                fields.insert("sequence".to_string(), Value::String(contig.sequence));
                Value::Object(fields)
            })
            .collect();
        object.insert("contigs".to_string(), Value::Array(contigs));
        Value::Object(object)
    }

    /// Drops every contig shorter than `min_length`, keeping the survivors in
    /// their original order.
    pub fn retain_min_length(&mut self, min_length: u64) -> FilterCounts {
        let contigs = std::mem::take(&mut self.contigs);
        let (kept, counts) = filter_by_min_length(contigs, min_length);
        self.contigs = kept;
        counts
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterCounts {
    pub total: usize,
    pub remaining: usize,
}

impl FilterCounts {
    pub fn removed(&self) -> usize {
        self.total - self.remaining
    }
}

pub fn filter_by_min_length(contigs: Vec<Contig>, min_length: u64) -> (Vec<Contig>, FilterCounts) {
    let mut counts = FilterCounts::default();
    let mut kept = Vec::with_capacity(contigs.len());
    for contig in contigs {
        counts.total += 1;
        if contig.length() >= min_length {
            kept.push(contig);
            counts.remaining += 1;
        }
    }
    (kept, counts)
}

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Record – one row of the counts file
// ---------------------------------------------------------------------------

/// A single `(context, symbol, count)` row. The counts file has no header,
/// so fields are assigned by position in this order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub context: String,
    pub symbol: String,
    pub count: i64,
}

#[cfg(test)]
impl Record {
    pub fn new(context: &str, symbol: &str, count: i64) -> Self {
        Self {
            context: context.to_string(),
            symbol: symbol.to_string(),
            count,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded file
// ---------------------------------------------------------------------------

/// All records in file order. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ContextGroup – rows sharing one context value
// ---------------------------------------------------------------------------

/// A borrowed view of the records whose context equals `context`,
/// in dataset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextGroup<'a> {
    pub context: &'a str,
    pub records: Vec<&'a Record>,
}

impl<'a> ContextGroup<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(symbol, count)` pairs in group order.
    pub fn bars(&self) -> impl Iterator<Item = (&'a str, i64)> + '_ {
        self.records.iter().map(|&r| (r.symbol.as_str(), r.count))
    }
}

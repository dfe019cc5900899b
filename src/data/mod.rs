/// Data layer: core types, loading, and grouping.
///
/// Architecture:
/// ```text
///  context_counts.csv   (context,symbol,count – no header)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, file order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  group    │  distinct contexts → one ContextGroup each
///   └──────────┘
/// ```

pub mod group;
pub mod loader;
pub mod model;

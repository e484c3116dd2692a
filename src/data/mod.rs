/// Data layer: core types, loading, and trace transforms.
///
/// Architecture:
/// ```text
///   scope export (.csv)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  validate header, parse body → ValidatedTrace
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ transform  │  amplitude / offsets per channel → Curve
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   axis    │  axis title exponent, tick labels
///   └──────────┘
/// ```

pub mod axis;
pub mod loader;
pub mod model;
pub mod transform;

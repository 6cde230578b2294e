use serde::{Deserialize, Serialize};

/// Separator joining the components of a compound series/axis name.
pub const FIELD_DELIMITER: &str = "\u{2015}";

/// Structural role a field plays on a shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldRole {
    Dimension,
    Timestamp,
    Measure,
    Calculated,
}

/// A field placed on a pivot shelf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotField {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    pub role: FieldRole,
    /// Granularity unit for timestamp-formatted dimensions.
    #[serde(default)]
    pub format_unit: Option<String>,
    /// Transient selection-filter values attached by the selection state
    /// machine; cleared on selection clear.
    #[serde(skip)]
    pub filter_data: Vec<String>,
}

impl PivotField {
    #[must_use]
    pub fn new(name: impl Into<String>, role: FieldRole) -> Self {
        Self {
            name: name.into(),
            alias: None,
            role,
            format_unit: None,
            filter_data: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Alias when present and non-empty, raw name otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match &self.alias {
            Some(alias) if !alias.is_empty() => alias,
            _ => &self.name,
        }
    }

    /// A dimension carrying a time format unit behaves as a timestamp.
    #[must_use]
    pub fn effective_role(&self) -> FieldRole {
        if self.role == FieldRole::Dimension && self.format_unit.is_some() {
            FieldRole::Timestamp
        } else {
            self.role
        }
    }
}

/// The user's assignment of fields to column/row/aggregation shelves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PivotConfig {
    pub columns: Vec<PivotField>,
    pub rows: Vec<PivotField>,
    pub aggregations: Vec<PivotField>,
}

/// Which shelf a resolved field list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShelfKind {
    Columns,
    Rows,
    Aggregations,
}

/// Ordered field-name lists per shelf role.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PivotTableInfo {
    pub cols: Vec<String>,
    pub rows: Vec<String>,
    pub aggs: Vec<String>,
}

impl PivotTableInfo {
    #[must_use]
    pub fn new(cols: Vec<String>, rows: Vec<String>, aggs: Vec<String>) -> Self {
        Self { cols, rows, aggs }
    }

    #[must_use]
    pub fn shelf(&self, kind: ShelfKind) -> &[String] {
        match kind {
            ShelfKind::Columns => &self.cols,
            ShelfKind::Rows => &self.rows,
            ShelfKind::Aggregations => &self.aggs,
        }
    }

    /// Locates the shelf and position holding `field_name`.
    #[must_use]
    pub fn locate(&self, field_name: &str) -> Option<(ShelfKind, usize)> {
        for kind in [ShelfKind::Columns, ShelfKind::Rows, ShelfKind::Aggregations] {
            if let Some(index) = self.shelf(kind).iter().position(|name| name == field_name) {
                return Some((kind, index));
            }
        }
        None
    }
}

/// Field-name projections resolved from a pivot configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedFieldInfo {
    /// Alias-preferring projection driving axis names and legends.
    pub display: PivotTableInfo,
    /// Raw-name projection used for stable cross-referencing by color and
    /// legend logic.
    pub origin: PivotTableInfo,
    /// Set when any shelf holds a timestamp field; consumed by the
    /// zoom-window heuristics.
    pub has_time_field: bool,
}

/// Derives display and origin field-name projections from the shelves.
///
/// The display aggregation list keeps measure-role fields only; the origin
/// projection keeps every field by raw name. Absent shelves yield empty
/// lists.
#[must_use]
pub fn resolve_field_info(pivot: &PivotConfig) -> ResolvedFieldInfo {
    let mut has_time_field = false;
    let mut note_time = |field: &PivotField| {
        if field.effective_role() == FieldRole::Timestamp {
            has_time_field = true;
        }
    };

    let display_names = |fields: &[PivotField],
                         role: Option<FieldRole>,
                         note_time: &mut dyn FnMut(&PivotField)| {
        fields
            .iter()
            .filter(|field| role.is_none_or(|role| field.role == role))
            .map(|field| {
                note_time(field);
                field.display_name().to_owned()
            })
            .collect::<Vec<_>>()
    };
    let origin_names = |fields: &[PivotField], note_time: &mut dyn FnMut(&PivotField)| {
        fields
            .iter()
            .map(|field| {
                note_time(field);
                field.name.clone()
            })
            .collect::<Vec<_>>()
    };

    let display = PivotTableInfo::new(
        display_names(&pivot.columns, None, &mut note_time),
        display_names(&pivot.rows, None, &mut note_time),
        display_names(&pivot.aggregations, Some(FieldRole::Measure), &mut note_time),
    );
    let origin = PivotTableInfo::new(
        origin_names(&pivot.columns, &mut note_time),
        origin_names(&pivot.rows, &mut note_time),
        origin_names(&pivot.aggregations, &mut note_time),
    );

    ResolvedFieldInfo {
        display,
        origin,
        has_time_field,
    }
}

/// Derives the data-driven pivot info: category labels as cols, de-measured
/// series names as rows, the display aggregations as aggs.
#[must_use]
pub fn resolve_pivot_info(
    rows: &[String],
    column_names: impl Iterator<Item = impl AsRef<str>>,
    display_aggs: &[String],
) -> PivotTableInfo {
    let mut pivot_rows = Vec::new();
    for name in column_names {
        let parts: Vec<&str> = name.as_ref().split(FIELD_DELIMITER).collect();
        if parts.len() > 1 {
            pivot_rows.push(parts[..parts.len() - 1].join(FIELD_DELIMITER));
        }
    }

    PivotTableInfo::new(rows.to_vec(), pivot_rows, display_aggs.to_vec())
}

/// Strips the trailing measure component from a compound series name.
#[must_use]
pub fn series_group_name(column_name: &str) -> String {
    let parts: Vec<&str> = column_name.split(FIELD_DELIMITER).collect();
    if parts.len() > 1 {
        parts[..parts.len() - 1].join(FIELD_DELIMITER)
    } else {
        column_name.to_owned()
    }
}

/// Distinct series group names across columns, in first-seen order.
#[must_use]
pub fn series_group_names<'a>(column_names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for name in column_names {
        let group = series_group_name(name);
        if !groups.contains(&group) {
            groups.push(group);
        }
    }
    groups
}

/// Number of fields of `role` on one shelf, honoring the timestamp-formatted
/// dimension promotion.
#[must_use]
pub fn field_role_count(fields: &[PivotField], role: FieldRole) -> usize {
    fields
        .iter()
        .filter(|field| field.effective_role() == role)
        .count()
}

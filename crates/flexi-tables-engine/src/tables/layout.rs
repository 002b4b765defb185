/// Horizontal alignment of a column, fixed for the lifetime of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    None,
    Start,
    Center,
    End,
}

impl Alignment {
    /// Alignment from the presence of leading/trailing `:` markers.
    #[must_use]
    pub fn from_markers(leading: bool, trailing: bool) -> Self {
        match (leading, trailing) {
            (true, true) => Alignment::Center,
            (true, false) => Alignment::Start,
            (false, true) => Alignment::End,
            (false, false) => Alignment::None,
        }
    }

    /// Alignment of a delimiter or border fill such as `:---` or `===:`.
    #[must_use]
    pub fn from_fill(fill: &str) -> Self {
        Self::from_markers(fill.starts_with(':'), fill.len() > 1 && fill.ends_with(':'))
    }

    /// BEM modifier suffix, e.g. `_align_center`.
    #[must_use]
    pub fn modifier(self) -> Option<&'static str> {
        match self {
            Alignment::None => None,
            Alignment::Start => Some("_align_start"),
            Alignment::Center => Some("_align_center"),
            Alignment::End => Some("_align_end"),
        }
    }
}

/// Column structure shared by every row of one table.
///
/// Established by the first structural line(s) and never changed afterwards.
/// Pipe tables only know their column count; grid tables also know the char
/// offsets of the `+` corners in their first border line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    alignments: Vec<Alignment>,
    boundaries: Option<Vec<usize>>,
}

impl ColumnLayout {
    #[must_use]
    pub fn pipe(alignments: Vec<Alignment>) -> Self {
        Self {
            alignments,
            boundaries: None,
        }
    }

    /// Grid layout from strictly increasing `+` offsets.
    ///
    /// # Panics
    /// Panics if there is not exactly one more boundary than alignments.
    #[must_use]
    pub fn grid(boundaries: Vec<usize>, alignments: Vec<Alignment>) -> Self {
        assert_eq!(
            boundaries.len(),
            alignments.len() + 1,
            "grid layout needs column_count + 1 boundaries"
        );
        Self {
            alignments,
            boundaries: Some(boundaries),
        }
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.alignments.len()
    }

    #[must_use]
    pub fn alignments(&self) -> &[Alignment] {
        &self.alignments
    }

    /// Alignment of `column`; out-of-range columns are unaligned.
    #[must_use]
    pub fn alignment(&self, column: usize) -> Alignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }

    /// Corner offsets of a grid layout, `None` for pipe tables.
    #[must_use]
    pub fn boundaries(&self) -> Option<&[usize]> {
        self.boundaries.as_deref()
    }

    #[must_use]
    pub fn is_grid(&self) -> bool {
        self.boundaries.is_some()
    }

    /// Width in chars every border and content line of a grid table must have.
    #[must_use]
    pub fn width(&self) -> Option<usize> {
        self.boundaries
            .as_ref()
            .and_then(|b| b.last())
            .map(|last| last + 1)
    }
}

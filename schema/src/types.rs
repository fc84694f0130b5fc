/// The semantic type a field's wire-format string decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// A plain string, no further interpretation.
    Text,
    /// A short code, textually identical to `Text` but semantically an identifier.
    Id,
    /// `YYYYMMDD` (8 digits) or `YYMMDD` (6 digits, century resolved via pivot).
    Date,
    /// 4 or 6 digits, retained as a string per spec §4.C.
    Time,
    /// `YYYYMMDDHHMM` (12 digits).
    DateTime,
    /// A fixed-point numeric string.
    Decimal,
    /// A value restricted to a fixed set of codes.
    Enum(&'static [&'static str]),
    /// A composite made of sub-components, each with its own schema.
    Composite(&'static [FieldSchema]),
}

/// Schema for a single field (element) of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub min_len: usize,
    pub max_len: usize,
}

impl FieldSchema {
    pub const fn text(name: &'static str, required: bool, min_len: usize, max_len: usize) -> Self {
        Self {
            name,
            field_type: FieldType::Text,
            required,
            min_len,
            max_len,
        }
    }

    pub const fn id(name: &'static str, required: bool, min_len: usize, max_len: usize) -> Self {
        Self {
            name,
            field_type: FieldType::Id,
            required,
            min_len,
            max_len,
        }
    }

    pub const fn date(name: &'static str, required: bool) -> Self {
        Self {
            name,
            field_type: FieldType::Date,
            required,
            min_len: 6,
            max_len: 8,
        }
    }

    pub const fn time(name: &'static str, required: bool) -> Self {
        Self {
            name,
            field_type: FieldType::Time,
            required,
            min_len: 4,
            max_len: 6,
        }
    }

    pub const fn datetime(name: &'static str, required: bool) -> Self {
        Self {
            name,
            field_type: FieldType::DateTime,
            required,
            min_len: 12,
            max_len: 12,
        }
    }

    pub const fn decimal(
        name: &'static str,
        required: bool,
        min_len: usize,
        max_len: usize,
    ) -> Self {
        Self {
            name,
            field_type: FieldType::Decimal,
            required,
            min_len,
            max_len,
        }
    }

    pub const fn enumerated(
        name: &'static str,
        required: bool,
        values: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            field_type: FieldType::Enum(values),
            required,
            min_len: 1,
            max_len: 3,
        }
    }

    pub const fn composite(
        name: &'static str,
        required: bool,
        components: &'static [FieldSchema],
    ) -> Self {
        Self {
            name,
            field_type: FieldType::Composite(components),
            required,
            min_len: 1,
            max_len: 255,
        }
    }
}

/// Schema for a whole segment: its name and ordered field schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSchema],
}

/// A flat, statically-built table of segment schemas, looked up by name.
#[derive(Debug, Clone, Copy)]
pub struct SchemaRegistry {
    segments: &'static [SegmentSchema],
}

impl SchemaRegistry {
    pub const fn new(segments: &'static [SegmentSchema]) -> Self {
        Self { segments }
    }

    pub fn lookup(&self, name: &str) -> Option<&'static SegmentSchema> {
        self.segments.iter().find(|s| s.name == name)
    }

    pub fn segments(&self) -> &'static [SegmentSchema] {
        self.segments
    }
}

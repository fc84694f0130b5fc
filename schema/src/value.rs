/// A fixed-point decimal value decoded from an X12 numeric field.
///
/// X12 carries decimals as plain digit strings with an implicit decimal
/// point position; `scale` is the number of fractional digits the source
/// string actually had, so re-serializing preserves the input's precision
/// rather than forcing a fixed display scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decimal {
    mantissa: i64,
    scale: u8,
}

impl Decimal {
    pub fn new(mantissa: i64, scale: u8) -> Self {
        Self { mantissa, scale }
    }

    pub fn mantissa(&self) -> i64 {
        self.mantissa
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    /// Render at the value's own scale, e.g. mantissa=1050, scale=2 -> "10.50".
    pub fn render(&self, buf: &mut impl core::fmt::Write) -> core::fmt::Result {
        self.render_at(self.scale, buf)
    }

    /// Render at a caller-chosen scale (spec §4.C: "two fractional digits by
    /// default; the schema may override"), rounding toward zero if the
    /// requested scale is smaller than the stored one.
    pub fn render_at(&self, scale: u8, buf: &mut impl core::fmt::Write) -> core::fmt::Result {
        let negative = self.mantissa < 0;
        let mut mantissa = self.mantissa.unsigned_abs();

        if scale < self.scale {
            let drop = (self.scale - scale) as u32;
            mantissa /= 10u64.pow(drop);
        } else if scale > self.scale {
            let grow = (scale - self.scale) as u32;
            mantissa *= 10u64.pow(grow);
        }

        if negative && mantissa != 0 {
            buf.write_char('-')?;
        }

        if scale == 0 {
            return write!(buf, "{}", mantissa);
        }

        let divisor = 10u64.pow(scale as u32);
        let whole = mantissa / divisor;
        let frac = mantissa % divisor;
        write!(buf, "{}.{:0width$}", whole, frac, width = scale as usize)
    }
}

/// A calendar date with an explicitly resolved four-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    /// Number of digits the value was originally encoded with (6 or 8), so a
    /// serializer can reproduce the wire form rather than always emitting 8.
    pub source_width: u8,
}

/// A date combined with an hour/minute, per X12's 12-digit datetime fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleDateTime {
    pub date: SimpleDate,
    pub hour: u8,
    pub minute: u8,
}

/// A single decoded field value.
///
/// `Composite` does not eagerly decode its sub-components: it retains the raw
/// element and the sub-schema so a caller can decode only the components it
/// needs, via [`crate::decode::DecodedSegment::component`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Null,
    Text(&'a str),
    Decimal(Decimal),
    Date(SimpleDate),
    /// Retained verbatim; spec §4.C treats time as a "time-string" semantic type.
    Time(&'a str),
    DateTime(SimpleDateTime),
    Composite(segment::Element<'a>),
}

impl<'a> FieldValue<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<SimpleDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<SimpleDateTime> {
        match self {
            FieldValue::DateTime(d) => Some(*d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate alloc;
    use alloc::string::String;
    use pretty_assertions::assert_eq;

    fn render(d: Decimal) -> String {
        let mut s = String::new();
        d.render(&mut s).unwrap();
        s
    }

    fn render_at(d: Decimal, scale: u8) -> String {
        let mut s = String::new();
        d.render_at(scale, &mut s).unwrap();
        s
    }

    #[test]
    fn renders_at_native_scale() {
        assert_eq!(render(Decimal::new(1050, 2)), "10.50");
        assert_eq!(render(Decimal::new(-1050, 2)), "-10.50");
        assert_eq!(render(Decimal::new(7, 0)), "7");
    }

    #[test]
    fn renders_at_overridden_scale() {
        assert_eq!(render_at(Decimal::new(105, 1), 2), "10.50");
        assert_eq!(render_at(Decimal::new(1050, 2), 1), "10.5");
    }
}

// Helpers shared between the engine and anything else reading sales exports.

// Numeric cleanup for vendor exports. Cells arrive with currency symbols,
// grouping commas and sometimes a decimal comma, with no locale attached.
pub mod numeric_format {
    /// Cleans a raw numeric cell into a finite `f64`, or `None` when the
    /// value is missing or cannot be read.
    ///
    /// Everything except decimal digits, `,` and `.` is dropped first, so
    /// currency symbols, spaces and minus signs disappear. Non-ASCII digits
    /// are mapped to ASCII. A single comma with no
    /// period is a decimal separator when at most two characters follow it
    /// (`"1,50"` -> 1.5) and a thousands separator otherwise
    /// (`"1,500"` -> 1500.0). In every other shape all commas are grouping.
    /// This is a heuristic: `"1,234"` always reads as 1234.
    pub fn clean_numeric(raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("none")
        {
            return None;
        }

        let filtered: String = trimmed
            .chars()
            .filter_map(|c| match c {
                ',' | '.' => Some(c),
                _ => decimal_digit(c),
            })
            .collect();
        if filtered.is_empty() {
            return None;
        }

        let commas = filtered.matches(',').count();
        let has_period = filtered.contains('.');
        let normalized = match filtered.split_once(',') {
            Some((_, fraction)) if commas == 1 && !has_period => {
                if fraction.len() <= 2 {
                    filtered.replace(',', ".")
                } else {
                    filtered.replace(',', "")
                }
            }
            _ => filtered.replace(',', ""),
        };

        normalized
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    // First code point of every run of ten Unicode decimal digits (Nd), Unicode 14.
    const DECIMAL_DIGIT_ZEROS: [u32; 66] = [
        0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6,
        0x0C66, 0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0,
        0x1810, 0x1946, 0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620,
        0xA8D0, 0xA900, 0xA9D0, 0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066,
        0x110F0, 0x11136, 0x111D0, 0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730,
        0x118E0, 0x11950, 0x11C50, 0x11D50, 0x11DA0, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE,
        0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6, 0x1E140, 0x1E2F0, 0x1E950, 0x1FBF0,
    ];

    /// Maps any Unicode decimal digit (`"٣"`, `"３"`, ...) to its ASCII form.
    fn decimal_digit(c: char) -> Option<char> {
        if c.is_ascii_digit() {
            return Some(c);
        }
        let code = c as u32;
        let zero = match DECIMAL_DIGIT_ZEROS.binary_search(&code) {
            Ok(idx) => DECIMAL_DIGIT_ZEROS[idx],
            Err(0) => return None,
            Err(idx) => DECIMAL_DIGIT_ZEROS[idx - 1],
        };
        char::from_digit(code - zero, 10)
    }

    /// Formats a sales figure as `$X.XX`. A missing figure becomes an empty
    /// cell rather than a made-up amount.
    pub fn format_currency(value: Option<f64>) -> String {
        match value {
            Some(v) => format!("${:.2}", v),
            None => String::new(),
        }
    }

}

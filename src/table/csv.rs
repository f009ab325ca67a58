use ::csv;
use std::borrow::Cow;
use std::io::Write;
use crate::error::Result;
use super::ResultRow;

/// First line of every non-empty output table.
pub const HEADER : [&str; 3] = ["title", "x", "y"];

/// Escapes a label for the title column. Labels containing a comma, a double
/// quote or a line feed are wrapped in double quotes, with inner quotes doubled;
/// anything else (carriage returns and surrounding blanks included) goes out verbatim.
pub fn escape_label(label : &str) -> Cow<'_, str> {
    if label.contains(|c : char| c == ',' || c == '"' || c == '\n' ) {
        Cow::Owned(format!("\"{}\"", label.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(label)
    }
}

/// Smallest and largest magnitudes written in positional notation.
const POSITIONAL_RANGE : (f64, f64) = (1E-5, 1E16);

/// Renders a coordinate with '.' as decimal separator and the shortest
/// representation that parses back to the same value. Magnitudes outside
/// POSITIONAL_RANGE (rounding residue near zero, mostly) use exponent form.
/// Neither form consults any locale setting.
pub fn format_coord(v : f64) -> String {
    let a = v.abs();
    if a == 0.0 || (a >= POSITIONAL_RANGE.0 && a < POSITIONAL_RANGE.1) {
        v.to_string()
    } else {
        format!("{:e}", v)
    }
}

/// Writes the header followed by one line per row. Writes nothing at all
/// (not even the header) when there are no rows.
pub fn write_rows<W>(dst : W, rows : &[ResultRow]) -> Result<()>
where
    W : Write
{
    if rows.is_empty() {
        return Ok(());
    }

    // Fields are escaped by escape_label, so the writer must not quote again.
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(dst);
    wtr.write_record(&HEADER)?;
    for row in rows {
        wtr.write_record(&[
            &escape_label(&row.label)[..],
            &format_coord(row.x)[..],
            &format_coord(row.y)[..]
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Renders the table to a string (see write_rows).
pub fn build_string(rows : &[ResultRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_rows(&mut buf, rows)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

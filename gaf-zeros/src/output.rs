use std::io::{prelude::*, Result};

use gaf::Zeros;

use crate::utils::{error, Format};

pub fn write_zeros(writer: &mut impl Write, zeros: &Zeros, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *writer, zeros)?;
            writeln!(writer)?;
        }
        Format::Ron => {
            let s = ron::ser::to_string_pretty(zeros, ron::ser::PrettyConfig::default())
                .map_err(|e| error(&e.to_string()))?;
            writeln!(writer, "{s}")?;
        }
        Format::Text => {
            let r = &zeros.region;
            writeln!(
                writer,
                "# {} N={} region {} {} {} {}",
                zeros.basis, zeros.order, r.x_min, r.x_max, r.y_min, r.y_max
            )?;
            for z in &zeros.roots {
                writeln!(writer, "{} {}", z.re, z.im)?;
            }
        }
    }
    writer.flush()
}

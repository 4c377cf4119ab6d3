use crate::pins::Pin;
use crate::time::SimTime;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use ::vcd::{IdCode, TimescaleUnit, Value, Writer};

fn bit(b: bool) -> Value {
    if b { Value::V1 } else { Value::V0 }
}

/// Writes the testbench pins to a VCD file, one change record per pin whose
/// value differs from the previous dump.
pub struct VcdWriter {
    writer: Writer<Box<dyn Write>>,
    id_map: HashMap<Pin, IdCode>,
    last_values: HashMap<Pin, u8>,
    timestamp: Option<SimTime>,
}

impl std::fmt::Debug for VcdWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VcdWriter")
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

impl VcdWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = BufWriter::new(File::create(path)?);
        Self::from_writer(Box::new(file))
    }

    pub fn from_writer(out: Box<dyn Write>) -> io::Result<Self> {
        let mut writer = Writer::new(out);
        let mut id_map = HashMap::new();

        writer.date(&chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string())?;
        writer.version("ttbench")?;
        writer.timescale(1, TimescaleUnit::PS)?;
        writer.add_module("tb")?;
        for pin in Pin::ALL {
            let id = writer.add_wire(pin.width(), pin.name())?;
            id_map.insert(pin, id);
        }
        writer.upscope()?;
        writer.enddefinitions()?;

        Ok(Self {
            writer,
            id_map,
            last_values: HashMap::new(),
            timestamp: None,
        })
    }

    /// Records the pins returned by `get_val` at `timestamp`, emitting only
    /// those that changed since the previous dump.
    pub fn dump(&mut self, timestamp: SimTime, get_val: impl Fn(Pin) -> u8) -> io::Result<()> {
        if self.timestamp.is_none_or(|t| timestamp > t) {
            self.writer.timestamp(timestamp)?;
            self.timestamp = Some(timestamp);
        }

        for pin in Pin::ALL {
            let id = self.id_map[&pin];
            let current = get_val(pin);
            if self.last_values.get(&pin) == Some(&current) {
                continue;
            }
            if pin.width() == 1 {
                self.writer.change_scalar(id, bit(current != 0))?;
            } else {
                let bits = (0..pin.width()).rev().map(|i| bit((current >> i) & 1 != 0));
                self.writer.change_vector(id, bits)?;
            }
            self.last_values.insert(pin, current);
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

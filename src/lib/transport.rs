use std::io::{self, Write};
use std::time::Duration;

use colored::Colorize;
use serde::Serialize;
use serialport::{SerialPort, SerialPortType};

use crate::viseme::Viseme;

const SERIAL_TIMEOUT: Duration = Duration::from_secs(1);

/// A byte link to a mouth controller.
pub trait Transport: Send {
    /// Write one shape byte.
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Release the link. Called once, right before the transport is dropped.
    fn close(&mut self) {}
}

/// Opens transports by address and rate.
pub trait Opener {
    type Transport: Transport + 'static;

    fn open(&self, address: &str, rate: u32) -> io::Result<Self::Transport>;
}

/// Serial port link, e.g. an Arduino driving an LCD face.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl Transport for SerialTransport {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.port.write_all(&[byte])?;
        self.port.flush()
    }

    fn close(&mut self) {
        let _ = self.port.flush();
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SerialOpener;

impl Opener for SerialOpener {
    type Transport = SerialTransport;

    fn open(&self, address: &str, rate: u32) -> io::Result<SerialTransport> {
        let port = serialport::new(address, rate)
            .timeout(SERIAL_TIMEOUT)
            .open()?;
        Ok(SerialTransport { port })
    }
}

/// Simulated display that draws each received shape as text.
pub struct ConsoleFace<W: Write + Send> {
    label: String,
    out: W,
}

impl<W: Write + Send> ConsoleFace<W> {
    pub fn new(label: impl Into<String>, out: W) -> Self {
        Self {
            label: label.into(),
            out,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn glyph(viseme: Viseme) -> &'static str {
    match viseme {
        Viseme::OpenA => "(  O  )",
        Viseme::OpenE => "( === )",
        Viseme::RoundO => "(  o  )",
        Viseme::NarrowU => "(  .  )",
        Viseme::ClosedM => "( --- )",
    }
}

impl<W: Write + Send> Transport for ConsoleFace<W> {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        let viseme = Viseme::from_byte(byte).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, format!("not a mouth shape: {byte:#04x}"))
        })?;
        let face = if viseme.is_rest() {
            glyph(viseme).dimmed()
        } else {
            glyph(viseme).bright_yellow()
        };
        writeln!(self.out, "[{}] {} {}", self.label, face, viseme)?;
        self.out.flush()
    }
}

/// Opens a [`ConsoleFace`] on stdout. The address is only used as a label.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOpener;

impl Opener for ConsoleOpener {
    type Transport = ConsoleFace<io::Stdout>;

    fn open(&self, address: &str, _rate: u32) -> io::Result<Self::Transport> {
        Ok(ConsoleFace::new(address, io::stdout()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PortEntry {
    pub name: String,
    pub kind: String,
}

/// Serial ports currently visible to the system.
pub fn list_ports() -> io::Result<Vec<PortEntry>> {
    let ports = serialport::available_ports()?;
    Ok(ports
        .into_iter()
        .map(|info| {
            let kind = match info.port_type {
                SerialPortType::UsbPort(usb) => match usb.product {
                    Some(product) => format!("usb ({product})"),
                    None => format!("usb ({:04x}:{:04x})", usb.vid, usb.pid),
                },
                SerialPortType::PciPort => "pci".to_string(),
                SerialPortType::BluetoothPort => "bluetooth".to_string(),
                SerialPortType::Unknown => "unknown".to_string(),
            };
            PortEntry {
                name: info.port_name,
                kind,
            }
        })
        .collect())
}

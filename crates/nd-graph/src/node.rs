//! Circuit node data.

/// A named voltage node.
///
/// The registry owns nodes; elements refer to them through a `NodeId`.
/// `index` is the MNA index handed out by the last successful allocation
/// (`None` until then, and again after a failed one).
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    is_reference: bool,
    index: Option<usize>,
    voltage: f64,
    previous_voltage: f64,
}

impl Node {
    /// Create a regular (non-reference) node at 0 V.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_reference: false,
            index: None,
            voltage: 0.0,
            previous_voltage: 0.0,
        }
    }

    /// Create the reference (ground) node.
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            is_reference: true,
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_reference(&self) -> bool {
        self.is_reference
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Voltage solved at the most recent step (volts).
    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    /// Voltage of the step before the most recent one (volts).
    pub fn previous_voltage(&self) -> f64 {
        self.previous_voltage
    }

    /// Overwrite the present voltage. Does not touch the previous voltage.
    pub fn set_voltage(&mut self, voltage: f64) {
        self.voltage = voltage;
    }

    pub fn set_previous_voltage(&mut self, voltage: f64) {
        self.previous_voltage = voltage;
    }

    /// Copy the present voltage into the previous-voltage slot.
    pub fn commit_previous(&mut self) {
        self.previous_voltage = self.voltage;
    }

    /// Zero both voltage slots.
    pub fn clear_voltages(&mut self) {
        self.voltage = 0.0;
        self.previous_voltage = 0.0;
    }

    pub(crate) fn set_index(&mut self, index: Option<usize>) {
        self.index = index;
    }
}

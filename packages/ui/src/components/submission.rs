/// Whether a form submission is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Submission {
    in_flight: bool,
}

impl Submission {
    /// Mark a submission as started. Returns `false` when one is already running,
    /// in which case the caller must not send another request.
    pub fn begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}

quantity!(Percentage, via: f64, suffix: "%", precision: 0);

impl Percentage {
    /// Convert the percentage into `0.0..=1.0`.
    pub const fn to_ratio(self) -> f64 {
        0.01 * self.0
    }
}

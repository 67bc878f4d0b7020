quantity!(Volts, via: f64, suffix: "V", precision: 0);

quantity!(KilowattHourRate, via: f64, suffix: "FCFA/kWh", precision: 2);

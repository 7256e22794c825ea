pub mod lorentz;

pub mod configuration;

pub mod distribution {
    pub mod distribution;
    pub mod distributionerror;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod curveerror;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
            pub mod piecewisepolynomial;
        }
    }
    pub mod goodnessoffit;
    pub mod grid;
}

pub mod plot {
    pub mod plotsurface;
    pub mod jsonplotsurface;
}

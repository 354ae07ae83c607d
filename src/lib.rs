pub mod configuration;
pub mod logger;

pub mod cli {
    pub mod clierror;
    pub mod prompt;
    pub mod trapezoidsession;
    pub mod pisession;
}

pub mod expression {
    pub mod parseexpressionerror;
    pub mod lexer;
    pub mod expression;
    pub mod parser;
}

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod point2d;

    pub mod function {
        pub mod realfunction;
    }

    pub mod integration {
        pub mod integrationerror;
        pub mod interval;
        pub mod trapezoidal;
        pub mod subdivisioncomparison;
    }

    pub mod montecarlo {
        pub mod piestimator;
    }
}

pub mod problem {
    pub mod integrationproblem;
    pub mod problemmanager;
}

pub mod render {
    pub mod renderer;
    pub mod trapezoidplot;
    pub mod textrenderer;
    pub mod jsonrenderer;
}

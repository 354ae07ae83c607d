use std::io::{
    BufRead,
    Write
};

use tracing::{
    debug,
    warn
};

use crate::cli::clierror::CliError;
use crate::cli::prompt::Prompter;
use crate::configuration::Configuration;
use crate::expression::expression::Expression;
use crate::math::integration::integrationerror::IntegrationError;
use crate::math::integration::interval::Interval;
use crate::math::integration::subdivisioncomparison::{
    compare_subdivisions,
    default_comparison_counts
};
use crate::math::integration::trapezoidal::{
    TrapezoidalEstimate,
    estimate_on
};
use crate::problem::integrationproblem::IntegrationProblem;
use crate::render::renderer::Renderer;
use crate::render::trapezoidplot::TrapezoidPlot;

/// 梯形法的互動流程。狀態（設定、輸入輸出、renderer）皆由呼叫端建立後傳入。
pub struct TrapezoidSession<'a, R, W> {
    configuration: &'a Configuration,
    prompter: Prompter<R, W>,
    renderers: Vec<Box<dyn Renderer + 'a>>
}

impl<'a, R, W> TrapezoidSession<'a, R, W> where
    R: BufRead,
    W: Write {
    pub fn new(configuration: &'a Configuration,
               prompter: Prompter<R, W>,
               renderers: Vec<Box<dyn Renderer + 'a>>) -> TrapezoidSession<'a, R, W> {
        TrapezoidSession { configuration, prompter, renderers }
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    fn precision(&self) -> usize {
        self.configuration.settings().output_precision
    }

    fn render(&mut self,
              expression: &Expression,
              estimate: &TrapezoidalEstimate) -> Result<(), CliError> {
        let plot = TrapezoidPlot::new(
            expression,
            estimate,
            expression.source(),
            self.configuration.settings().curve_resolution
        );
        for renderer in self.renderers.iter_mut() {
            renderer.render_trapezoid(&plot)?;
        }
        Ok(())
    }

    fn report_approximation(&mut self, estimate: &TrapezoidalEstimate) -> Result<(), CliError> {
        let p = self.precision();
        self.prompter.say(&format!(
            "\nApproximation using {} trapezoids: {:.p$}",
            estimate.subdivisions(),
            estimate.value()
        ))
    }

    /// 完整互動流程：算式 → 下界 → 上界 → n → 結果 → 選擇性比較。
    ///
    /// 某點求值失敗時回報該點並重新要求算式，保留已輸入的區間與 n。
    pub fn run(&mut self) -> Result<(), CliError> {
        let parser = self.configuration.expression_parser();
        self.prompter.say("=== Numerical Integration using Trapezoidal Rule ===\n")?;

        let prompt = format!(
            "Enter the function to integrate in {} (e.g., {v}^2, sin({v}), exp(-{v}^2), etc.): ",
            parser.variable(),
            v = parser.variable()
        );
        let mut expression = self.prompter.read_expression(&prompt, &parser)?;
        let a = self.prompter.read_float("Enter the lower bound of integration (a): ")?;
        let b = self.prompter.read_upper_bound("Enter the upper bound of integration (b, must be > a): ", a)?;
        let n = self.prompter.read_count("Enter the number of subintervals (n): ", 1)?;
        let interval = Interval::new(a, b)?;

        let estimate = loop {
            match estimate_on(&expression, &interval, n) {
                Ok(estimate) => break estimate,
                Err(IntegrationError::FunctionEvaluation { x, source }) => {
                    warn!(expression = %expression, x, %source, "evaluation failed");
                    self.prompter.say(&format!("The function could not be evaluated at x = {}: {}", x, source))?;
                    self.prompter.say("Please enter a function defined on the whole interval.")?;
                    expression = self.prompter.read_expression(&prompt, &parser)?;
                },
                Err(error) => return Err(error.into())
            }
        };
        debug!(expression = %expression, a, b, n, value = estimate.value(), "integral estimated");

        self.report_approximation(&estimate)?;
        self.render(&expression, &estimate)?;

        if self.prompter.confirm("\nWould you like to compare results with different numbers of subintervals? (y/n): ")? {
            self.compare(&expression, &interval, &default_comparison_counts(n), None)?;
        }
        Ok(())
    }

    /// 非互動：直接計算設定檔中的具名題目。
    pub fn run_problem(&mut self, problem: &IntegrationProblem) -> Result<(), CliError> {
        let estimate = problem.solve()?;
        debug!(problem = problem.name(), value = estimate.value(), "problem solved");
        self.report_approximation(&estimate)?;
        self.render(problem.expression(), &estimate)?;
        self.compare(problem.expression(), &problem.interval(), &problem.comparison_counts(), problem.exact())
    }

    fn compare(&mut self,
               expression: &Expression,
               interval: &Interval,
               counts: &[usize],
               exact: Option<f64>) -> Result<(), CliError> {
        match compare_subdivisions(expression, interval.lower(), interval.upper(), counts) {
            Ok(results) => {
                for renderer in self.renderers.iter_mut() {
                    renderer.render_comparison(&results, exact)?;
                }
                Ok(())
            },
            Err(IntegrationError::FunctionEvaluation { x, source }) => {
                self.prompter.say(&format!("Comparison stopped: the function could not be evaluated at x = {}: {}", x, source))
            },
            Err(error) => Err(error.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use serde_json::json;

    use super::*;
    use crate::render::textrenderer::TextRenderer;

    fn run_with_input(input: &str) -> (String, String) {
        let configuration = Configuration::default();
        let mut rendered = Vec::new();
        let prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let prompts = {
            let renderer: Box<dyn Renderer + '_> = Box::new(TextRenderer::new(&mut rendered, 6));
            let mut session = TrapezoidSession::new(&configuration, prompter, vec![renderer]);
            session.run().unwrap();
            session.into_prompter().into_inner().1
        };
        (String::from_utf8(prompts).unwrap(), String::from_utf8(rendered).unwrap())
    }

    #[test]
    fn interactive_run_with_comparison() {
        let (prompts, rendered) = run_with_input("x^2\n0\n1\n4\ny\n");
        assert!(prompts.contains("Approximation using 4 trapezoids: 0.343750"));
        assert!(rendered.contains("Integral ≈ 0.343750"));
        assert!(rendered.contains("n = 2: approximation = 0.375000"));
        assert!(rendered.contains("n = 8: approximation = "));
    }

    #[test]
    fn failing_point_is_reported_and_expression_reprompted() {
        let (prompts, _) = run_with_input("ln(x)\n0\n1\n2\nx\nn\n");
        assert!(prompts.contains("could not be evaluated at x = 0"));
        assert!(prompts.contains("Approximation using 2 trapezoids: 0.500000"));
    }

    #[test]
    fn named_problem_prints_errors_against_exact_value() {
        let configuration = Configuration::from_json(json!({
            "problems": [
                { "name": "parabola", "expression": "x^2", "lower": 0, "upper": 1,
                  "subdivisions": 10, "comparison": [10, 100], "exact": 0.3333333333333333 }
            ]
        })).unwrap();
        let problem = configuration.problem("parabola").unwrap();
        let mut rendered = Vec::new();
        {
            let renderer: Box<dyn Renderer + '_> = Box::new(TextRenderer::new(&mut rendered, 6));
            let prompter = Prompter::new(Cursor::new(Vec::new()), Vec::new());
            let mut session = TrapezoidSession::new(&configuration, prompter, vec![renderer]);
            session.run_problem(&problem).unwrap();
        }
        let text = String::from_utf8(rendered).unwrap();
        assert!(text.contains("n = 10: approximation = 0.335000, error = "));
        assert!(text.contains("n = 100: approximation = "));
    }
}

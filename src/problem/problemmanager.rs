use std::sync::Arc;

use serde::Deserialize;

use crate::expression::parser::ExpressionParser;
use crate::manager::manager::Manager;
use crate::manager::managererror::{
    ManagerError,
    parse_json_value
};
use crate::math::integration::interval::Interval;
use crate::problem::integrationproblem::IntegrationProblem;

#[derive(Deserialize)]
struct IntegrationProblemJsonProp {
    name: String,
    expression: String,
    lower: f64,
    upper: f64,
    subdivisions: usize,
    #[serde(default)]
    comparison: Option<Vec<usize>>,
    #[serde(default)]
    exact: Option<f64>
}

fn integration_problem_from_json(json_value: serde_json::Value,
                                 parser: &ExpressionParser) -> Result<Arc<IntegrationProblem>, ManagerError> {
    let json_prop: IntegrationProblemJsonProp = parse_json_value(json_value)?;
    let name = json_prop.name;
    let expression = parser
        .parse(&json_prop.expression)
        .map_err(|source| ManagerError::ExpressionError { name: name.clone(), source })?;
    let interval = Interval::new(json_prop.lower, json_prop.upper)
        .map_err(|source| ManagerError::IntegrationError { name: name.clone(), source })?;
    let problem = IntegrationProblem::new(
        name.clone(),
        expression,
        interval,
        json_prop.subdivisions,
        json_prop.comparison,
        json_prop.exact
    ).map_err(|source| ManagerError::IntegrationError { name, source })?;
    Ok(Arc::new(problem))
}

pub struct ProblemManager;

impl ProblemManager {
    pub fn new() -> Manager<Arc<IntegrationProblem>, ExpressionParser> {
        Manager::new(integration_problem_from_json)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::manager::manager::IManager;

    #[test]
    fn loads_valid_problems() {
        let manager = ProblemManager::new();
        let problems = [
            json!({"name": "parabola", "expression": "x^2", "lower": 0, "upper": 1, "subdivisions": 10,
                   "comparison": [10, 100], "exact": 0.3333333333333333}),
            json!({"name": "gauss", "expression": "exp(-x^2)", "lower": -1, "upper": 1, "subdivisions": 8})
        ];
        manager.insert_obj_from_json_vec(&problems, &ExpressionParser::default()).unwrap();

        let parabola = manager.get("parabola").unwrap();
        assert_eq!(parabola.comparison_counts(), vec![10, 100]);
        assert_eq!(parabola.exact(), Some(0.3333333333333333));
        let gauss = manager.get("gauss").unwrap();
        assert_eq!(gauss.comparison_counts(), vec![4, 8, 16, 32]);
        assert_eq!(gauss.exact(), None);
    }

    #[test]
    fn rejects_invalid_problems() {
        let manager = ProblemManager::new();
        let parser = ExpressionParser::default();

        let bad_expression = json!({"name": "bad", "expression": "x +", "lower": 0, "upper": 1, "subdivisions": 1});
        assert!(matches!(
            manager.insert_obj_from_json(bad_expression, &parser),
            Err(ManagerError::ExpressionError { name, .. }) if name == "bad"
        ));

        let reversed = json!({"name": "reversed", "expression": "x", "lower": 5, "upper": 2, "subdivisions": 1});
        assert!(matches!(
            manager.insert_obj_from_json(reversed, &parser),
            Err(ManagerError::IntegrationError { .. })
        ));

        let no_panels = json!({"name": "empty", "expression": "x", "lower": 0, "upper": 1, "subdivisions": 0});
        assert!(manager.insert_obj_from_json(no_panels, &parser).is_err());
        assert!(manager.names().is_empty());
    }
}

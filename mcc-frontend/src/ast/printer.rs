//! Tree rendering of expressions for `--dump-ast`

use super::{Expression, ExpressionKind};

/// Renders an expression as an indented tree:
///
/// ```text
/// Add
/// |-Constant, <value = 1>
/// `-Mul
///   |-Constant, <value = 2>
///   `-Constant, <value = 3>
/// ```
pub struct AstPrinter {
    output: String,
}

impl AstPrinter {
    pub fn print(expr: &Expression) -> String {
        let mut printer = Self {
            output: String::new(),
        };
        printer.node(expr, "", None);
        printer.output
    }

    /// `is_last` is `None` for the root
    fn node(&mut self, expr: &Expression, prefix: &str, is_last: Option<bool>) {
        self.output.push_str(prefix);
        match is_last {
            Some(true) => self.output.push_str("`-"),
            Some(false) => self.output.push_str("|-"),
            None => {}
        }
        self.output.push_str(&Self::label(expr));
        self.output.push('\n');

        let child_prefix = match is_last {
            Some(false) => format!("{prefix}| "),
            Some(true) => format!("{prefix}  "),
            None => prefix.to_string(),
        };

        let children = expr.children();
        let count = children.len();
        for (index, child) in children.into_iter().enumerate() {
            self.node(child, &child_prefix, Some(index + 1 == count));
        }
    }

    fn label(expr: &Expression) -> String {
        match &expr.kind {
            ExpressionKind::Constant(value) => format!("Constant, <value = {value}>"),
            ExpressionKind::Identifier(name) => format!("Identifier, <name = {name}>"),
            ExpressionKind::Group(_) => "Parentheses".to_string(),
            ExpressionKind::Unary { op, .. } => op.name().to_string(),
            ExpressionKind::Binary { op, .. } => op.name().to_string(),
            ExpressionKind::Assign { .. } => "Assign".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Frontend;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn tree(source: &str) -> String {
        let expr = Frontend::default()
            .parse_statement(source, 1)
            .unwrap()
            .expect("statement should not be empty");
        AstPrinter::print(&expr)
    }

    #[test]
    fn test_print_precedence_tree() {
        let expected = indoc! {"
            Assign
            |-Identifier, <name = x>
            `-Add
              |-Constant, <value = 1>
              `-Mul
                |-Constant, <value = 2>
                `-Constant, <value = 3>
        "};
        assert_eq!(tree("x=1+2*3;"), expected);
    }

    #[test]
    fn test_print_nested_left_branch() {
        let expected = indoc! {"
            Sub
            |-Sub
            | |-Identifier, <name = x>
            | `-Parentheses
            |   `-PostInc
            |     `-Identifier, <name = y>
            `-Minus
              `-Constant, <value = 4>
        "};
        assert_eq!(tree("x-(y++)- -4;"), expected);
    }
}

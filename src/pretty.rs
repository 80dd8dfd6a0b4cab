use super::types::{display_position, Term};

impl Term {
    /// An indented tree rendering of the `Term`, one node per line, each non-root node labelled
    /// with its [`Position`].
    ///
    /// [`Position`]: type.Position.html
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{Signature, parse_term};
    /// let sig = Signature::new(&[("f", 2), ("g", 1)], &["x", "y"]).expect("signature");
    /// let term = parse_term(&sig, "f(x, g(y))").expect("parsed term");
    ///
    /// assert_eq!(term.tree(), "f\n+--x (1)\n+--g (2)\n   +--y (2.1)\n");
    /// ```
    pub fn tree(&self) -> String {
        self.tree_with_spacing(2)
    }
    /// Like [`Term::tree`], with `spacing` dashes per branch (at least one).
    ///
    /// [`Term::tree`]: #method.tree
    pub fn tree_with_spacing(&self, spacing: usize) -> String {
        let spacing = spacing.max(1);
        let mut out = String::new();
        for (term, position) in self.subterms() {
            let depth = position.len();
            if depth > 0 {
                out.push_str(&" ".repeat((spacing + 1) * (depth - 1)));
                out.push('+');
                out.push_str(&"-".repeat(spacing));
            }
            out.push_str(term.head().name());
            if depth > 0 {
                out.push_str(&format!(" ({})", display_position(&position)));
            }
            out.push('\n');
        }
        out
    }
}

use crate::prelude::*;

impl Board
{
    /// Standard debug.
    pub(super) fn debug(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "Board {{ {:?}, {:?} }}", self.rules, self.history)
    }

    /// Pretty print.
    pub(super) fn pretty(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "Board {{ {:?} }}\nwith {:#?}\nwith Grid\n{}", self.rules, self.history, self)
    }
}

impl std::fmt::Display for Board
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        let Rules { width, height, .. } = self.rules;

        for row in 0..height
        {
            let line = (0..width)
                .map(|col| self.cell(row, col).map(|p| p.glyph()).unwrap_or('.').to_string())
                .collect::<Vec<String>>()
                .join(" ");
            writeln!(f, "{}", line)?;
        }

        let footer = (0..width).map(|col| format!("{}", col % 10)).collect::<Vec<String>>().join(" ");
        write!(f, "{}", footer)
    }
}

/// The `Operator` enum represents each of the possible math operators
/// that can be in a cage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Nop,
}

impl Operator {
    /// Retrieve the character representation of the symbol
    pub fn symbol(&self) -> Option<char> {
        let symbol = match *self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Nop => return None,
        };
        Some(symbol)
    }

    /// A stable numeric id, used in grid definition strings
    pub fn id(&self) -> u32 {
        match *self {
            Operator::Nop => 0,
            Operator::Add => 1,
            Operator::Subtract => 2,
            Operator::Multiply => 3,
            Operator::Divide => 4,
        }
    }
}

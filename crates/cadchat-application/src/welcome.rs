//! Example prompts offered on the welcome view.

/// Prompts that submit a query when chosen.
pub const WELCOME_EXAMPLES: &[&str] = &[
    "Create a cylinder with a diameter of 50mm and a height of 30mm",
    "Design a 100x50x20mm rectangular box with a 10mm diameter hole in the top face",
    "Make a spur gear with module 2 and 30 teeth",
    "Design a simple phone stand",
    "Create a helical spring with a 5mm pitch",
    "Make a hex nut, 20mm across flats",
];

/// Looks up an example by its one-based menu number.
pub fn welcome_example(number: usize) -> Option<&'static str> {
    number
        .checked_sub(1)
        .and_then(|index| WELCOME_EXAMPLES.get(index))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_example_is_one_based() {
        assert_eq!(welcome_example(0), None);
        assert_eq!(welcome_example(1), Some(WELCOME_EXAMPLES[0]));
        assert_eq!(welcome_example(WELCOME_EXAMPLES.len() + 1), None);
    }
}

use std::fmt;
use std::str::FromStr;

/// A validated polynomial degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Degree(usize);

/// Why the degree entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DegreeError {
    #[error("Polynomial degree was not entered")]
    Empty,

    #[error("Polynomial degree cannot be negative (got {0})")]
    Negative(i64),

    #[error("Polynomial degree must be an integer (got '{0}')")]
    NotInteger(String),

    /// All digits, but too long for a machine-sized integer.
    #[error("Polynomial degree {0} is too large to represent")]
    Overflow(String),
}

impl Degree {
    pub fn new(degree: usize) -> Self {
        Degree(degree)
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Number of coefficients a fit of this degree produces.
    pub fn coefficient_count(self) -> usize {
        self.0 + 1
    }
}

impl FromStr for Degree {
    type Err = DegreeError;

    /// Parse the contents of the degree text entry.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DegreeError::Empty);
        }
        if let Ok(n) = s.parse::<usize>() {
            return Ok(Degree::new(n));
        }
        match s.parse::<i64>() {
            Ok(n) if n < 0 => Err(DegreeError::Negative(n)),
            // "-0"
            Ok(n) => usize::try_from(n)
                .map(Degree::new)
                .map_err(|_| DegreeError::Overflow(s.to_string())),
            Err(_) if is_unsigned_digits(s) => Err(DegreeError::Overflow(s.to_string())),
            Err(_) => Err(DegreeError::NotInteger(s.to_string())),
        }
    }
}

fn is_unsigned_digits(s: &str) -> bool {
    let digits = s.strip_prefix('+').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integers() {
        assert_eq!("3".parse::<Degree>(), Ok(Degree(3)));
        assert_eq!("  0 ".parse::<Degree>(), Ok(Degree(0)));
        assert_eq!("+2".parse::<Degree>(), Ok(Degree(2)));
        assert_eq!("-0".parse::<Degree>(), Ok(Degree(0)));
    }

    #[test]
    fn rejects_empty_entry() {
        assert_eq!("".parse::<Degree>(), Err(DegreeError::Empty));
        assert_eq!("   ".parse::<Degree>(), Err(DegreeError::Empty));
    }

    #[test]
    fn rejects_negative() {
        assert_eq!("-1".parse::<Degree>(), Err(DegreeError::Negative(-1)));
    }

    #[test]
    fn rejects_non_integers() {
        assert_eq!(
            "2.5".parse::<Degree>(),
            Err(DegreeError::NotInteger("2.5".to_string()))
        );
        assert_eq!(
            "two".parse::<Degree>(),
            Err(DegreeError::NotInteger("two".to_string()))
        );
        assert!(matches!("-".parse::<Degree>(), Err(DegreeError::NotInteger(_))));
        assert!(matches!("+".parse::<Degree>(), Err(DegreeError::NotInteger(_))));
    }

    #[test]
    fn accepts_high_degrees() {
        assert_eq!("65".parse::<Degree>().map(Degree::get), Ok(65));
        assert_eq!("100".parse::<Degree>().map(Degree::get), Ok(100));
        assert_eq!("100".parse::<Degree>().map(Degree::coefficient_count), Ok(101));
    }

    #[test]
    fn rejects_digits_beyond_usize() {
        assert_eq!(
            "99999999999999999999999".parse::<Degree>(),
            Err(DegreeError::Overflow("99999999999999999999999".to_string()))
        );
    }
}

//! Utility functions

/// Masks the middle six digits of a CPF for log output: `111.***.***-35`.
///
/// Anything that does not reduce to eleven digits is fully masked.
pub fn mask_cpf(cpf: &str) -> String {
    let digits: Vec<char> = cpf.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 11 {
        return "***".to_string();
    }
    let head: String = digits[..3].iter().collect();
    let tail: String = digits[9..].iter().collect();
    format!("{}.***.***-{}", head, tail)
}

/// Strips credentials from a connection URL, keeping only what follows `@`.
pub fn redact_url(url: &str) -> &str {
    match url.rfind('@') {
        Some(pos) => &url[pos + 1..],
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_formatted_and_plain_cpf() {
        assert_eq!(mask_cpf("11144477735"), "111.***.***-35");
        assert_eq!(mask_cpf("111.444.777-35"), "111.***.***-35");
    }

    #[test]
    fn masks_garbage_completely() {
        assert_eq!(mask_cpf("12345"), "***");
        assert_eq!(mask_cpf(""), "***");
    }

    #[test]
    fn redacts_credentials() {
        assert_eq!(redact_url("postgres://user:pw@db:5432/farmers"), "db:5432/farmers");
        assert_eq!(redact_url("postgres://localhost/farmers"), "postgres://localhost/farmers");
    }
}

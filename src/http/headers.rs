//! # Mapa de Headers
//! src/http/headers.rs
//!
//! Mapa `Nombre -> Valor` compartido por requests y responses.
//!
//! - Los nombres se comparan tal cual (sensible a mayúsculas): `user-agent`
//!   no satisface una búsqueda de `User-Agent`.
//! - Si un nombre se repite gana la última ocurrencia, pero conserva la
//!   posición de la primera.
//! - La iteración sigue el orden de inserción, así la codificación es
//!   determinista.

/// Headers HTTP en orden de inserción
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Crea un mapa vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta o reemplaza un header
    ///
    /// Retorna el valor anterior si el nombre ya existía.
    ///
    /// # Ejemplo
    /// ```
    /// use file_echo_server::http::Headers;
    ///
    /// let mut headers = Headers::new();
    /// headers.insert("Accept", "*/*");
    /// assert_eq!(headers.insert("Accept", "text/plain"), Some("*/*".to_string()));
    /// assert_eq!(headers.get("Accept"), Some("text/plain"));
    /// ```
    pub fn insert(&mut self, name: &str, value: &str) -> Option<String> {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, old)) => Some(std::mem::replace(old, value.to_string())),
            None => {
                self.entries.push((name.to_string(), value.to_string()));
                None
            }
        }
    }

    /// Busca un header por su nombre exacto
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Itera los pares `(nombre, valor)` en orden de inserción
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "text/plain");
        headers.insert("Content-Length", "5");
        headers.insert("X-Extra", "1");

        let names: Vec<&str> = headers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Content-Type", "Content-Length", "X-Extra"]);
    }

    #[test]
    fn test_last_occurrence_wins_keeps_slot() {
        let mut headers = Headers::new();
        headers.insert("A", "1");
        headers.insert("B", "2");
        headers.insert("A", "3");

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("A"), Some("3"));
        assert_eq!(headers.iter().next(), Some(("A", "3")));
    }

    #[test]
    fn test_case_sensitive_lookup() {
        let mut headers = Headers::new();
        headers.insert("user-agent", "curl/8.0");

        assert_eq!(headers.get("User-Agent"), None);
        assert_eq!(headers.get("user-agent"), Some("curl/8.0"));
    }

    #[test]
    fn test_empty() {
        let headers = Headers::new();
        assert!(headers.is_empty());
        assert_eq!(headers.iter().count(), 0);
    }
}

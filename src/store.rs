//! # Byte-Store
//! src/store.rs
//!
//! Almacenamiento de archivos usado por las rutas `/files/`. El router solo
//! conoce el trait [`ByteStore`]; el servidor real usa [`FsStore`] sobre el
//! directorio configurado.
//!
//! Los nombres vienen directo del path del request, así que se validan antes
//! de tocar el disco: nada de `..`, rutas absolutas, `\` ni bytes NUL.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

/// Errores del store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("File not found: {0}")]
    NotFound(String),

    /// Nombre rechazado antes de unirlo al directorio base
    #[error("Invalid file name: {0:?}")]
    InvalidName(String),

    #[error("Store I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Capacidad de leer y escribir bytes por nombre
pub trait ByteStore: Send + Sync {
    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError>;

    /// Escribe el contenido completo; si el archivo existe se reemplaza
    fn write(&self, name: &str, data: &[u8]) -> Result<(), StoreError>;
}

/// Valida un nombre relativo
///
/// Acepta subdirectorios (`a/b.txt`) pero rechaza segmentos vacíos, `.`
/// y `..`.
///
/// # Ejemplo
/// ```
/// use file_echo_server::store::validate_name;
///
/// assert!(validate_name("note.txt").is_ok());
/// assert!(validate_name("../../etc/passwd").is_err());
/// assert!(validate_name("/etc/passwd").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<&str, StoreError> {
    let invalid = name.is_empty()
        || name.contains('\0')
        || name.contains('\\')
        || name.starts_with('/')
        || name
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");

    if invalid {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(name)
}

/// Store respaldado por el filesystem, con raíz en un directorio
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Une un nombre validado al directorio raíz
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        Ok(self.root.join(validate_name(name)?))
    }
}

impl ByteStore for FsStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.resolve(name)?;
        fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(name.to_string()),
            _ => StoreError::Io(e),
        })
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<(), StoreError> {
        let path = self.resolve(name)?;
        fs::write(&path, data)?;
        Ok(())
    }
}

/// Store en memoria, útil para pruebas y para embeber el router
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cantidad de archivos guardados
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // Un panic en otro thread no invalida el contenido del mapa
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ByteStore for MemoryStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let name = validate_name(name)?;
        self.lock()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<(), StoreError> {
        let name = validate_name(name)?;
        self.lock().insert(name.to_string(), data.to_vec());
        Ok(())
    }
}

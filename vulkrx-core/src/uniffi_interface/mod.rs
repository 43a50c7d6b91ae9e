pub mod errors;
pub mod logging;
pub mod objects;
pub mod shell;

use crate::db;
use crate::uniffi_interface::errors::VulkrxError;

/// Creates `vulkrx.db` under `dir` if needed and brings its schema up to date.
#[uniffi::export]
pub fn setup_database(dir: &str) -> Result<String, VulkrxError> {
    let path = db::default_db_path(dir);
    let path = path
        .to_str()
        .ok_or_else(|| VulkrxError::from("Database path is not valid UTF-8"))?
        .to_string();

    let rt = crate::runtime::init_global_runtime_blocking();
    rt.block_on(async {
        let pool = db::open_pool(&path).await?;
        let result = db::init_database(&pool).await;
        pool.close().await;
        result
    })?;
    Ok(path)
}

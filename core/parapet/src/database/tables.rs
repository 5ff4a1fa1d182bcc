pub const CREATE_BLOCKS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS blocks (
        height INTEGER PRIMARY KEY,
        hash TEXT NOT NULL
    )";

pub const CREATE_TRANSACTIONS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS transactions (
        id INTEGER PRIMARY KEY,
        tx_index INTEGER NOT NULL,
        tx_hash TEXT NOT NULL UNIQUE,
        block_index INTEGER NOT NULL,
        source TEXT NOT NULL,
        destination TEXT NOT NULL,
        data BLOB NOT NULL,
        FOREIGN KEY (block_index) REFERENCES blocks(height) ON DELETE CASCADE
    )";

// Asset names are reassignable over time; every row is a point-in-time binding
// and resolution is always relative to a block height.
pub const CREATE_ASSETS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS assets (
        asset_id INTEGER NOT NULL,
        asset_name TEXT NOT NULL,
        block_index INTEGER NOT NULL,

        UNIQUE (asset_id, block_index),
        UNIQUE (asset_name, block_index)
    )";

pub const CREATE_BALANCES_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS balances (
        address TEXT NOT NULL,
        asset TEXT NOT NULL,
        quantity INTEGER NOT NULL,

        UNIQUE (address, asset)
    )";

pub const CREATE_SENDS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS sends (
        tx_index INTEGER NOT NULL,
        tx_hash TEXT NOT NULL,
        block_index INTEGER NOT NULL,
        source TEXT NOT NULL,
        destination TEXT NOT NULL,
        asset TEXT,
        quantity INTEGER,
        status TEXT NOT NULL
    )";

pub const CREATE_SENDS_INDEX: &str = "
    CREATE INDEX IF NOT EXISTS idx_sends_tx_hash ON sends(tx_hash)
    ";

pub const CREATE_CREDITS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS credits (
        block_index INTEGER NOT NULL,
        address TEXT NOT NULL,
        asset TEXT NOT NULL,
        quantity INTEGER NOT NULL,
        action TEXT NOT NULL,
        event TEXT NOT NULL
    )";

pub const CREATE_DEBITS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS debits (
        block_index INTEGER NOT NULL,
        address TEXT NOT NULL,
        asset TEXT NOT NULL,
        quantity INTEGER NOT NULL,
        action TEXT NOT NULL,
        event TEXT NOT NULL
    )";

pub async fn initialize_database(conn: &libsql::Connection) -> Result<(), libsql::Error> {
    conn.query("PRAGMA foreign_keys = ON;", ()).await?;
    conn.execute(CREATE_BLOCKS_TABLE, ()).await?;
    conn.execute(CREATE_TRANSACTIONS_TABLE, ()).await?;
    conn.execute(CREATE_ASSETS_TABLE, ()).await?;
    conn.execute(CREATE_BALANCES_TABLE, ()).await?;
    conn.execute(CREATE_SENDS_TABLE, ()).await?;
    conn.execute(CREATE_SENDS_INDEX, ()).await?;
    conn.execute(CREATE_CREDITS_TABLE, ()).await?;
    conn.execute(CREATE_DEBITS_TABLE, ()).await?;
    Ok(())
}

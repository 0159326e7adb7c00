//! Dashboard constants.

/// Gas limit attached to every escrow transaction.
///
/// The escrow endpoints are cheap, but the wallet expects the dapp to provide
/// a limit up front; unused gas is refunded by the network.
pub const ESCROW_GAS_LIMIT: u64 = 60_000_000;

/// Number of decimal places of the native token.
///
/// One display unit equals `10^18` of the smallest denomination.
pub const NATIVE_DECIMALS: u32 = 18;

/// Timeout applied to every gateway request.
///
/// Matches the default timeout of the official network providers; it is the
/// only time bound in the system.
pub const GATEWAY_TIMEOUT_SECS: u64 = 6;

/// The escrow contract deployed on devnet.
pub const DEFAULT_CONTRACT_ADDRESS: &str =
    "erd1qqqqqqqqqqqqqpgqxwakt2g7u9atsnr03gqcgmhcv38pt7mkd94q6shuwt";

/// The public devnet gateway URL.
///
/// This endpoint is rate-limited.
pub const DEVNET_GATEWAY_URL: &str = "https://devnet-gateway.multiversx.com";

/// The public testnet gateway URL.
///
/// This endpoint is rate-limited.
pub const TESTNET_GATEWAY_URL: &str = "https://testnet-gateway.multiversx.com";

/// The public mainnet gateway URL.
///
/// This endpoint is rate-limited.
pub const MAINNET_GATEWAY_URL: &str = "https://gateway.multiversx.com";

/// Contract view returning every escrow visible to the caller.
pub const FN_GET_ESCROWS: &str = "getEscrows";

/// Contract endpoint creating an escrow funded by the attached value.
pub const FN_CREATE_ESCROW: &str = "createEscrow";

/// Contract endpoint releasing an active escrow to the buyer.
pub const FN_RELEASE_ESCROW: &str = "releaseEscrow";

/// Contract endpoint cancelling an active escrow and refunding the seller.
pub const FN_CANCEL_ESCROW: &str = "cancelEscrow";

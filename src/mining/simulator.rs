use crate::errors::LaunchError;
use crate::mining::token_order::CreateSimulator;
use alloy_primitives::{Address, B256, Bytes, TxKind};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{SolCall, sol};
use async_trait::async_trait;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

// Airlock ABI
sol! {
    #[derive(Debug, PartialEq)]
    struct CreateParams {
        uint256 initialSupply;
        uint256 numTokensToSell;
        address numeraire;
        address tokenFactory;
        bytes tokenFactoryData;
        address governanceFactory;
        bytes governanceFactoryData;
        address poolInitializer;
        bytes poolInitializerData;
        address liquidityMigrator;
        bytes liquidityMigratorData;
        address integrator;
        bytes32 salt;
    }

    function create(CreateParams createData) external returns (
        address asset,
        address pool,
        address governance,
        address timelock,
        address migrationPool
    );
}

/// Learns the token address of an Airlock `create` by simulating it with `eth_call`.
pub struct AirlockCreateSimulator<P: ?Sized> {
    provider: Arc<P>,
    airlock: Address,
    sender: Address,
    template: CreateParams,
}

impl<P: ?Sized> Debug for AirlockCreateSimulator<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AirlockCreateSimulator")
            .field("airlock", &self.airlock)
            .field("sender", &self.sender)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl<P: Provider + Send + Sync + 'static + ?Sized> AirlockCreateSimulator<P> {
    /// `template` carries every `create` argument except the salt, which is
    /// replaced on each simulation.
    pub fn new(
        provider: Arc<P>,
        airlock: Address,
        sender: Address,
        template: CreateParams,
    ) -> Self {
        Self {
            provider,
            airlock,
            sender,
            template,
        }
    }

    /// Calldata for `create` with the template's salt replaced.
    pub fn create_calldata(&self, salt: B256) -> Bytes {
        let mut params = self.template.clone();
        params.salt = salt;
        Bytes::from(createCall { createData: params }.abi_encode())
    }
}

#[async_trait]
impl<P: Provider + Send + Sync + 'static + ?Sized> CreateSimulator for AirlockCreateSimulator<P> {
    async fn simulate_create(&self, salt: B256) -> Result<Address, LaunchError> {
        let request = TransactionRequest {
            from: Some(self.sender),
            to: Some(TxKind::Call(self.airlock)),
            input: Some(self.create_calldata(salt)).into(),
            ..Default::default()
        };

        let result_bytes = self
            .provider
            .call(request)
            .await
            .map_err(|e| LaunchError::ProviderError(e.to_string()))?;

        let decoded = createCall::abi_decode_returns(&result_bytes)
            .map_err(|e| LaunchError::AbiDecodeError(e.to_string()))?;

        Ok(decoded.asset)
    }
}

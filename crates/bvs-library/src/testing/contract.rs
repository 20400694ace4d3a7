use cosmwasm_std::{to_json_binary, Addr, Empty, Env, StdResult, Storage, WasmMsg};
use cw_multi_test::error::AnyResult;
use cw_multi_test::{App, AppResponse, Contract, Executor};
use serde::de::DeserializeOwned;

/// TestingContract is a common interface to deploy and drive a contract inside a
/// `cw-multi-test` [App].
pub trait TestingContract<IM, EM, QM>
where
    IM: serde::Serialize,
    EM: serde::Serialize,
    QM: serde::Serialize,
{
    fn wrapper() -> Box<dyn Contract<Empty>>;

    fn default_init(app: &mut App, env: &Env) -> IM;

    fn new(app: &mut App, env: &Env, msg: Option<IM>) -> Self;

    fn addr(&self) -> &Addr;

    /// Store the code and instantiate it under `label`, with `admin` as the CosmWasm admin.
    /// The resulting address is remembered under `label`, see [TestingContract::get_contract_addr].
    fn deploy(app: &mut App, label: &str, msg: &IM) -> Addr {
        let code_id = app.store_code(Self::wrapper());
        let admin = app.api().addr_make("admin");
        let addr = app
            .instantiate_contract(
                code_id,
                app.api().addr_make("sender"),
                msg,
                &[],
                label,
                Some(admin.to_string()),
            )
            .unwrap();

        app.storage_mut()
            .set(Self::label_key(label).as_bytes(), addr.as_bytes());
        addr
    }

    /// Address of a contract previously deployed under `label`.
    /// Lets `default_init` wire contracts to each other without passing them around.
    fn get_contract_addr(app: &App, label: &str) -> Addr {
        let value = app
            .storage()
            .get(Self::label_key(label).as_bytes())
            .unwrap_or_else(|| panic!("contract {label} is not deployed"));
        Addr::unchecked(String::from_utf8(value).unwrap())
    }

    fn label_key(label: &str) -> String {
        format!("CONTRACT:{}", label)
    }

    fn execute(&self, app: &mut App, sender: &Addr, msg: &EM) -> AnyResult<AppResponse> {
        let execute_msg = WasmMsg::Execute {
            contract_addr: self.addr().to_string(),
            msg: to_json_binary(msg).expect("cannot serialize ExecuteMsg"),
            funds: vec![],
        };

        app.execute(sender.clone(), execute_msg.into())
    }

    fn query<T: DeserializeOwned>(&self, app: &App, msg: &QM) -> StdResult<T> {
        app.wrap().query_wasm_smart(self.addr(), msg)
    }
}

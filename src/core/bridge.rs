//! Command bridge: every operation is invokable by name with JSON arguments
//! and returns a JSON result. Argument keys are camelCase, except inside
//! `AddCardArgs` and `CollectionFilter`, whose fields are snake_case on the
//! wire.

use crate::config::Currency;
use crate::core::app::App;
use crate::domain::model::{AddCardArgs, CollectionFilter, ScryfallCard};
use crate::utils::error::{Result, VaultError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T> {
    let args = if args.is_null() { json!({}) } else { args };
    Ok(serde_json::from_value(args)?)
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn default_page() -> u32 {
    1
}

#[derive(Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default = "default_page")]
    page: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetCardArgs {
    scryfall_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LanguagesArgs {
    oracle_id: String,
    set_code: String,
}

#[derive(Deserialize)]
struct AddCardCommandArgs {
    args: AddCardArgs,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateDetailsArgs {
    id: String,
    condition: String,
    language: String,
    purchase_price: f64,
}

#[derive(Deserialize)]
struct UpdateQuantityArgs {
    id: String,
    quantity: i32,
}

#[derive(Deserialize)]
struct IdArgs {
    id: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GetCollectionArgs {
    filter: Option<CollectionFilter>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardIdArgs {
    card_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetCardsArgs {
    set_code: String,
    #[serde(default = "default_page")]
    page: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddWishlistArgs {
    card: ScryfallCard,
    #[serde(default)]
    target_price: Option<f64>,
    #[serde(default)]
    notes: Option<String>,
    priority: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateWishlistArgs {
    id: String,
    #[serde(default)]
    target_price: Option<f64>,
    #[serde(default)]
    notes: Option<String>,
    priority: i32,
}

#[derive(Deserialize)]
struct CreateTagArgs {
    name: String,
    color: String,
}

#[derive(Deserialize)]
struct TagIdArgs {
    id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardTagArgs {
    card_id: String,
    tag_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportArgs {
    csv_content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeArgs {
    image_data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrencyPreferenceArgs {
    currency_preference: Currency,
}

#[derive(Deserialize)]
struct SetCurrencyArgs {
    currency: Currency,
}

/// Dispatches one named command against the application state.
pub async fn dispatch(app: &App, command: &str, args: Value) -> Result<Value> {
    tracing::debug!("Dispatching command: {}", command);
    match command {
        "search_scryfall" => {
            let a: SearchArgs = parse_args(args)?;
            to_json(app.search_scryfall(&a.query, a.page).await?)
        }
        "get_card" => {
            let a: GetCardArgs = parse_args(args)?;
            to_json(app.get_card(&a.scryfall_id).await?)
        }
        "get_card_languages" => {
            let a: LanguagesArgs = parse_args(args)?;
            to_json(app.get_card_languages(&a.oracle_id, &a.set_code).await?)
        }
        "add_card" => {
            let a: AddCardCommandArgs = parse_args(args)?;
            to_json(app.add_card(a.args).await?)
        }
        "update_card_details" => {
            let a: UpdateDetailsArgs = parse_args(args)?;
            app.update_card_details(&a.id, &a.condition, &a.language, a.purchase_price)
                .await?;
            Ok(Value::Null)
        }
        "update_card_quantity" => {
            let a: UpdateQuantityArgs = parse_args(args)?;
            app.update_card_quantity(&a.id, a.quantity).await?;
            Ok(Value::Null)
        }
        "remove_card" => {
            let a: IdArgs = parse_args(args)?;
            app.remove_card(&a.id).await?;
            Ok(Value::Null)
        }
        "get_collection" => {
            let a: GetCollectionArgs = parse_args(args)?;
            to_json(app.get_collection(a.filter.unwrap_or_default()).await?)
        }
        "get_collection_stats" => to_json(app.get_collection_stats().await?),
        "get_card_price_history" => {
            let a: CardIdArgs = parse_args(args)?;
            to_json(app.get_card_price_history(&a.card_id).await?)
        }
        "get_portfolio_history" => to_json(app.get_portfolio_history().await?),
        "get_sets" => to_json(app.get_sets().await?),
        "import_sets" => to_json(app.import_sets().await?),
        "get_set_cards" => {
            let a: SetCardsArgs = parse_args(args)?;
            to_json(app.get_set_cards(&a.set_code, a.page).await?)
        }
        "get_market_trends" => to_json(app.get_market_trends().await?),
        "add_to_wishlist" => {
            let a: AddWishlistArgs = parse_args(args)?;
            to_json(
                app.add_to_wishlist(&a.card, a.target_price, a.notes, a.priority)
                    .await?,
            )
        }
        "remove_from_wishlist" => {
            let a: IdArgs = parse_args(args)?;
            app.remove_from_wishlist(&a.id).await?;
            Ok(Value::Null)
        }
        "update_wishlist_card" => {
            let a: UpdateWishlistArgs = parse_args(args)?;
            app.update_wishlist_card(&a.id, a.target_price, a.notes, a.priority)
                .await?;
            Ok(Value::Null)
        }
        "get_wishlist" => to_json(app.get_wishlist().await?),
        "get_all_tags" => to_json(app.get_all_tags().await?),
        "create_tag" => {
            let a: CreateTagArgs = parse_args(args)?;
            to_json(app.create_tag(&a.name, &a.color).await?)
        }
        "delete_tag" => {
            let a: TagIdArgs = parse_args(args)?;
            app.delete_tag(a.id).await?;
            Ok(Value::Null)
        }
        "get_card_tags" => {
            let a: CardIdArgs = parse_args(args)?;
            to_json(app.get_card_tags(&a.card_id).await?)
        }
        "add_tag_to_card" => {
            let a: CardTagArgs = parse_args(args)?;
            app.add_tag_to_card(&a.card_id, a.tag_id).await?;
            Ok(Value::Null)
        }
        "remove_tag_from_card" => {
            let a: CardTagArgs = parse_args(args)?;
            app.remove_tag_from_card(&a.card_id, a.tag_id).await?;
            Ok(Value::Null)
        }
        "export_collection" => to_json(app.export_collection().await?),
        "import_collection" => {
            let a: ImportArgs = parse_args(args)?;
            to_json(app.import_collection(&a.csv_content).await?)
        }
        "recognize_card_with_features" => {
            let a: RecognizeArgs = parse_args(args)?;
            to_json(app.recognize_card_with_features(&a.image_data).await?)
        }
        "update_prices" => {
            let a: CurrencyPreferenceArgs = parse_args(args)?;
            to_json(app.update_prices(a.currency_preference).await?)
        }
        "get_settings" => Ok(json!({ "currency": app.currency()? })),
        "set_currency" => {
            let a: SetCurrencyArgs = parse_args(args)?;
            app.set_currency(a.currency)?;
            Ok(Value::Null)
        }
        other => Err(VaultError::UnknownCommandError {
            command: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scryfall::ScryfallClient;
    use crate::adapters::store::open_in_memory;
    use httpmock::prelude::*;

    fn test_app(server: &MockServer) -> App {
        App::new(
            open_in_memory().unwrap(),
            ScryfallClient::with_base_url(server.base_url()),
        )
    }

    fn card_body(id: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "oracle_id": null,
            "name": name,
            "lang": "en",
            "set": "tst",
            "set_name": "Test Set",
            "collector_number": "1",
            "released_at": "2024-01-01",
            "artist": null,
            "image_uris": null,
            "prices": {"usd": "2.00", "usd_foil": null, "eur": null, "eur_foil": null},
            "rarity": "rare"
        })
    }

    #[tokio::test]
    async fn test_unknown_command_is_an_error_naming_it() {
        let server = MockServer::start();
        let app = test_app(&server);
        let err = dispatch(&app, "no_such_command", json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown command: no_such_command");
    }

    #[tokio::test]
    async fn test_add_card_through_bridge_uses_wire_format() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/cards/sc-1");
            then.status(200).json_body(card_body("sc-1", "Bolt"));
        });

        let app = test_app(&server);
        let id = dispatch(
            &app,
            "add_card",
            json!({
                "args": {
                    "scryfall_id": "sc-1",
                    "condition": "NM",
                    "purchase_price": 2.0,
                    "quantity": 1,
                    "is_foil": false,
                    "language": "English",
                    "finish": "nonfoil",
                    "tags": null
                },
                "currencyPreference": "USD"
            }),
        )
        .await
        .unwrap();
        assert!(id.is_string());

        let collection = dispatch(&app, "get_collection", Value::Null).await.unwrap();
        assert_eq!(collection.as_array().unwrap().len(), 1);
        assert_eq!(collection[0]["name"], "Bolt");
    }

    #[tokio::test]
    async fn test_camel_case_argument_keys() {
        let server = MockServer::start();
        let languages = server.mock(|when, then| {
            when.method(GET)
                .path("/cards/search")
                .query_param_exists("q");
            then.status(200).json_body(json!({
                "data": [card_body("a", "Card")],
                "has_more": false,
                "total_cards": 1
            }));
        });

        let app = test_app(&server);
        let result = dispatch(
            &app,
            "get_card_languages",
            json!({"oracleId": "oracle-1", "setCode": "tst"}),
        )
        .await
        .unwrap();
        languages.assert();
        assert_eq!(result, json!(["en"]));
    }

    #[tokio::test]
    async fn test_settings_roundtrip_through_bridge() {
        let server = MockServer::start();
        let app = test_app(&server);

        let settings = dispatch(&app, "get_settings", json!({})).await.unwrap();
        assert_eq!(settings, json!({"currency": "USD"}));

        dispatch(&app, "set_currency", json!({"currency": "EUR"}))
            .await
            .unwrap();
        let settings = dispatch(&app, "get_settings", json!({})).await.unwrap();
        assert_eq!(settings, json!({"currency": "EUR"}));
    }

    #[tokio::test]
    async fn test_tag_commands_through_bridge() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/cards/sc-1");
            then.status(200).json_body(card_body("sc-1", "Bolt"));
        });

        let app = test_app(&server);
        let card_id = dispatch(
            &app,
            "add_card",
            json!({"args": {
                "scryfall_id": "sc-1",
                "condition": "NM",
                "purchase_price": 0.0,
                "quantity": 1,
                "is_foil": false,
                "language": "English",
                "finish": null,
                "tags": null
            }}),
        )
        .await
        .unwrap();
        let card_id = card_id.as_str().unwrap().to_string();

        let tag_id = dispatch(&app, "create_tag", json!({"name": "Burn", "color": "#f00"}))
            .await
            .unwrap();
        dispatch(
            &app,
            "add_tag_to_card",
            json!({"cardId": card_id, "tagId": tag_id}),
        )
        .await
        .unwrap();

        let tags = dispatch(&app, "get_card_tags", json!({"cardId": card_id}))
            .await
            .unwrap();
        assert_eq!(tags[0]["name"], "Burn");
    }
}

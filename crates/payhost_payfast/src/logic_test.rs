#[cfg(test)]
mod tests {
    use crate::error::PayfastError;
    use crate::logic::{
        build_payment_params, build_subscription_params, format_amount, process_url,
        render_redirect_form, validate_url, CallbackUrls, CheckoutRequest, SubscriptionRequest,
    };
    use crate::signature::{generate_signature, SIGNATURE_FIELD};
    use payhost_config::PayfastConfig;

    const PASSPHRASE: &str = "secret";

    fn test_config() -> PayfastConfig {
        PayfastConfig {
            merchant_id: "M1".to_string(),
            merchant_key: "K1".to_string(),
            sandbox: true,
            base_url: None,
            public_base_url: "https://example.com".to_string(),
        }
    }

    fn checkout_request() -> CheckoutRequest {
        CheckoutRequest {
            amount: 10.0,
            item_name: "Widget".to_string(),
            email: None,
        }
    }

    fn subscription_request() -> SubscriptionRequest {
        SubscriptionRequest {
            amount: 49.9,
            item_name: "Monthly plan".to_string(),
            email: Some("customer@example.com".to_string()),
            user_id: Some("user-42".to_string()),
            frequency: "3".to_string(),
        }
    }

    #[test]
    fn amount_formats_to_two_decimals() {
        assert_eq!(format_amount(10.0), "10.00");
        assert_eq!(format_amount(49.9), "49.90");
        assert_eq!(format_amount(0.005), "0.01");
    }

    #[test]
    fn payment_params_carry_formatted_amount_and_hex_signature() {
        let config = test_config();
        let urls = CallbackUrls::payment(&config.public_base_url);
        let params =
            build_payment_params(&config, &urls, "ord-1", &checkout_request(), PASSPHRASE)
                .unwrap();

        assert_eq!(params["amount"], "10.00");
        assert_eq!(params["merchant_id"], "M1");
        assert_eq!(params["merchant_key"], "K1");
        assert_eq!(params["m_payment_id"], "ord-1");
        assert_eq!(params["email_address"], "");
        assert!(!params.contains_key("subscription_type"));

        let signature = &params[SIGNATURE_FIELD];
        assert_eq!(signature.len(), 32);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn recomputing_over_the_built_set_reproduces_the_signature() {
        let config = test_config();
        let urls = CallbackUrls::payment(&config.public_base_url);
        let params =
            build_payment_params(&config, &urls, "ord-1", &checkout_request(), PASSPHRASE)
                .unwrap();

        // The canonicalizer strips the signature field itself
        assert_eq!(
            generate_signature(&params, PASSPHRASE),
            params[SIGNATURE_FIELD]
        );
    }

    #[test]
    fn empty_and_non_empty_passphrases_yield_different_signatures() {
        let config = test_config();
        let urls = CallbackUrls::payment(&config.public_base_url);
        let with_secret =
            build_payment_params(&config, &urls, "ord-1", &checkout_request(), PASSPHRASE)
                .unwrap();
        let without_secret =
            build_payment_params(&config, &urls, "ord-1", &checkout_request(), "").unwrap();
        assert_ne!(with_secret[SIGNATURE_FIELD], without_secret[SIGNATURE_FIELD]);
    }

    #[test]
    fn non_positive_or_non_finite_amounts_are_rejected() {
        let config = test_config();
        let urls = CallbackUrls::payment(&config.public_base_url);
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let request = CheckoutRequest {
                amount,
                item_name: "Widget".to_string(),
                email: None,
            };
            let result = build_payment_params(&config, &urls, "ord-1", &request, PASSPHRASE);
            assert!(matches!(result, Err(PayfastError::InvalidAmount)));
        }
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let config = test_config();
        let urls = CallbackUrls::payment(&config.public_base_url);

        let request = CheckoutRequest {
            amount: 10.0,
            item_name: "  ".to_string(),
            email: None,
        };
        assert!(matches!(
            build_payment_params(&config, &urls, "ord-1", &request, PASSPHRASE),
            Err(PayfastError::MissingField("item_name"))
        ));

        let mut config_without_merchant = test_config();
        config_without_merchant.merchant_id = String::new();
        assert!(matches!(
            build_payment_params(
                &config_without_merchant,
                &urls,
                "ord-1",
                &checkout_request(),
                PASSPHRASE
            ),
            Err(PayfastError::MissingField("merchant_id"))
        ));
    }

    #[test]
    fn subscription_params_carry_recurring_fields() {
        let config = test_config();
        let urls = CallbackUrls::subscription(&config.public_base_url);
        let params = build_subscription_params(
            &config,
            &urls,
            "sub-1",
            &subscription_request(),
            PASSPHRASE,
        )
        .unwrap();

        assert_eq!(params["subscription_type"], "1");
        assert_eq!(params["recurring_amount"], "49.90");
        assert_eq!(params["recurring_amount"], params["amount"]);
        assert_eq!(params["recurring_frequency"], "3");
        assert_eq!(params["recurring_cycles"], "");
        assert_eq!(params["email_address"], "customer@example.com");

        // Signature covers the recurring fields too
        assert_eq!(
            generate_signature(&params, PASSPHRASE),
            params[SIGNATURE_FIELD]
        );
    }

    #[test]
    fn subscription_without_frequency_is_rejected() {
        let config = test_config();
        let urls = CallbackUrls::subscription(&config.public_base_url);
        let mut request = subscription_request();
        request.frequency = String::new();
        assert!(matches!(
            build_subscription_params(&config, &urls, "sub-1", &request, PASSPHRASE),
            Err(PayfastError::MissingField("frequency"))
        ));
    }

    #[test]
    fn callback_urls_point_at_the_public_base() {
        let urls = CallbackUrls::payment("https://example.com/");
        assert_eq!(urls.return_url, "https://example.com/api/payfast/pay-success");
        assert_eq!(urls.cancel_url, "https://example.com/api/payfast/pay-cancel");
        assert_eq!(urls.notify_url, "https://example.com/api/payfast/ipn");
    }

    #[test]
    fn gateway_urls_follow_the_configured_base() {
        let config = test_config();
        assert_eq!(
            process_url(&config),
            "https://sandbox.payfast.co.za/eng/process"
        );
        assert_eq!(
            validate_url(&config),
            "https://sandbox.payfast.co.za/eng/query/validate"
        );
    }

    #[test]
    fn redirect_form_escapes_values() {
        let config = test_config();
        let urls = CallbackUrls::payment(&config.public_base_url);
        let request = CheckoutRequest {
            amount: 10.0,
            item_name: "Widget \"Pro\" <deluxe>".to_string(),
            email: None,
        };
        let params =
            build_payment_params(&config, &urls, "ord-1", &request, PASSPHRASE).unwrap();
        let html = render_redirect_form(&process_url(&config), &params);

        assert!(html.contains(r#"action="https://sandbox.payfast.co.za/eng/process""#));
        assert!(html.contains("Widget &quot;Pro&quot; &lt;deluxe&gt;"));
        assert!(!html.contains("<deluxe>"));
        assert!(html.contains(r#"name="signature""#));
    }
}

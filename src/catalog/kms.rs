//! AWS Key Management Service

use crate::domain::{ConfirmImpact, Field, JsonVersion, Operation, Paging, Service};

pub static KMS: Service = Service {
    id: "kms",
    title: "AWS Key Management Service",
    noun_prefix: "KMS",
    signing_name: "kms",
    endpoint_prefix: "kms",
    dns_suffix: "amazonaws.com",
    target_prefix: "TrentService",
    json_version: JsonVersion::V1_1,
    pinned_region: None,
};

const KEY_USAGE: &[&str] = &[
    "ENCRYPT_DECRYPT",
    "SIGN_VERIFY",
    "GENERATE_VERIFY_MAC",
    "KEY_AGREEMENT",
];

const KEY_SPEC: &[&str] = &[
    "SYMMETRIC_DEFAULT",
    "RSA_2048",
    "RSA_3072",
    "RSA_4096",
    "ECC_NIST_P256",
    "ECC_NIST_P384",
    "ECC_NIST_P521",
    "ECC_SECG_P256K1",
    "HMAC_224",
    "HMAC_256",
    "HMAC_384",
    "HMAC_512",
    "ML_DSA_44",
    "ML_DSA_65",
    "ML_DSA_87",
    "SM2",
];

const ORIGIN: &[&str] = &["AWS_KMS", "EXTERNAL", "AWS_CLOUDHSM", "EXTERNAL_KEY_STORE"];

const ENCRYPTION_ALGORITHM: &[&str] = &[
    "SYMMETRIC_DEFAULT",
    "RSAES_OAEP_SHA_1",
    "RSAES_OAEP_SHA_256",
    "SM2PKE",
];

const SIGNING_ALGORITHM: &[&str] = &[
    "RSASSA_PSS_SHA_256",
    "RSASSA_PSS_SHA_384",
    "RSASSA_PSS_SHA_512",
    "RSASSA_PKCS1_V1_5_SHA_256",
    "RSASSA_PKCS1_V1_5_SHA_384",
    "RSASSA_PKCS1_V1_5_SHA_512",
    "ECDSA_SHA_256",
    "ECDSA_SHA_384",
    "ECDSA_SHA_512",
    "SM2DSA",
    "ML_DSA_SHAKE_256",
];

const MESSAGE_TYPE: &[&str] = &["RAW", "DIGEST", "EXTERNAL_MU"];

const MAC_ALGORITHM: &[&str] = &["HMAC_SHA_224", "HMAC_SHA_256", "HMAC_SHA_384", "HMAC_SHA_512"];

const DATA_KEY_SPEC: &[&str] = &["AES_256", "AES_128"];

const KEY_STORE_TYPE: &[&str] = &["AWS_CLOUDHSM", "EXTERNAL_KEY_STORE"];

const XKS_CONNECTIVITY: &[&str] = &["PUBLIC_ENDPOINT", "VPC_ENDPOINT_SERVICE"];

const KEY_ENCRYPTION_ALGORITHM: &[&str] = &["RSAES_OAEP_SHA_256"];

const KEY_ID: Field = Field::string("KeyId")
    .required()
    .help("Key ID, key ARN, alias name or alias ARN");

const GRANT_TOKENS: Field = Field::list("GrantTokens").aliases(&["GrantToken"]);

const DRY_RUN: Field = Field::boolean("DryRun");

const ENCRYPTION_CONTEXT: Field = Field::map("EncryptionContext");

const TAGS: Field = Field::tags("Tag", "TagKey", "TagValue")
    .at("Tags")
    .aliases(&["Tags"]);

const RECIPIENT_ALGORITHM: Field = Field::one_of("Recipient_KeyEncryptionAlgorithm", KEY_ENCRYPTION_ALGORITHM)
    .at("Recipient.KeyEncryptionAlgorithm");

const RECIPIENT_ATTESTATION: Field =
    Field::blob("Recipient_AttestationDocument").at("Recipient.AttestationDocument");

const XKS_FIELDS_HELP: &str = "External key store proxy setting";

pub static OPERATIONS: &[Operation] = &[
    Operation::new(
        &KMS,
        "CancelKeyDeletion",
        "Stop-KMSKeyDeletion",
        "Cancel the scheduled deletion of a KMS key",
        &[KEY_ID],
    )
    .impact(ConfirmImpact::Medium)
    .select("KeyId")
    .pass_thru("KeyId"),
    Operation::new(
        &KMS,
        "ConnectCustomKeyStore",
        "Connect-KMSCustomKeyStore",
        "Connect a custom key store to its backing key store",
        &[Field::string("CustomKeyStoreId").required()],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("CustomKeyStoreId"),
    Operation::new(
        &KMS,
        "CreateAlias",
        "New-KMSAlias",
        "Create a friendly name for a KMS key",
        &[
            Field::string("AliasName")
                .required()
                .help("Alias name, must begin with alias/"),
            Field::string("TargetKeyId").required(),
        ],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("TargetKeyId"),
    Operation::new(
        &KMS,
        "CreateCustomKeyStore",
        "New-KMSCustomKeyStore",
        "Create a custom key store backed by CloudHSM or an external key manager",
        &[
            Field::string("CustomKeyStoreName").required(),
            Field::string("CloudHsmClusterId"),
            Field::string("TrustAnchorCertificate"),
            Field::string("KeyStorePassword"),
            Field::one_of("CustomKeyStoreType", KEY_STORE_TYPE),
            Field::string("XksProxyUriEndpoint").help(XKS_FIELDS_HELP),
            Field::string("XksProxyUriPath").help(XKS_FIELDS_HELP),
            Field::string("XksProxyVpcEndpointServiceName").help(XKS_FIELDS_HELP),
            Field::string("XksProxyAuthenticationCredential_AccessKeyId")
                .at("XksProxyAuthenticationCredential.AccessKeyId"),
            Field::string("XksProxyAuthenticationCredential_RawSecretAccessKey")
                .at("XksProxyAuthenticationCredential.RawSecretAccessKey"),
            Field::one_of("XksProxyConnectivity", XKS_CONNECTIVITY),
        ],
    )
    .impact(ConfirmImpact::Medium)
    .select("CustomKeyStoreId"),
    Operation::new(
        &KMS,
        "CreateGrant",
        "New-KMSGrant",
        "Add a grant to a KMS key",
        &[
            KEY_ID,
            Field::string("GranteePrincipal").required(),
            Field::string("RetiringPrincipal"),
            Field::list("Operations").required().aliases(&["Operation"]),
            Field::map("Constraints_EncryptionContextEquals")
                .at("Constraints.EncryptionContextEquals"),
            Field::map("Constraints_EncryptionContextSubset")
                .at("Constraints.EncryptionContextSubset"),
            GRANT_TOKENS,
            Field::string("Name"),
            DRY_RUN,
        ],
    )
    .impact(ConfirmImpact::Medium),
    Operation::new(
        &KMS,
        "CreateKey",
        "New-KMSKey",
        "Create a KMS key",
        &[
            Field::string("Policy"),
            Field::string("Description"),
            Field::one_of("KeyUsage", KEY_USAGE),
            Field::one_of("CustomerMasterKeySpec", KEY_SPEC).help("Deprecated, use KeySpec"),
            Field::one_of("KeySpec", KEY_SPEC),
            Field::one_of("Origin", ORIGIN),
            Field::string("CustomKeyStoreId"),
            Field::boolean("BypassPolicyLockoutSafetyCheck"),
            TAGS,
            Field::boolean("MultiRegion"),
            Field::string("XksKeyId"),
        ],
    )
    .impact(ConfirmImpact::Medium)
    .select("KeyMetadata"),
    Operation::new(
        &KMS,
        "Decrypt",
        "Invoke-KMSDecrypt",
        "Decrypt ciphertext produced by Encrypt, ReEncrypt or GenerateDataKey",
        &[
            Field::blob("CiphertextBlob").required(),
            ENCRYPTION_CONTEXT,
            GRANT_TOKENS,
            Field::string("KeyId"),
            Field::one_of("EncryptionAlgorithm", ENCRYPTION_ALGORITHM),
            RECIPIENT_ALGORITHM,
            RECIPIENT_ATTESTATION,
            DRY_RUN,
        ],
    ),
    Operation::new(
        &KMS,
        "DeleteAlias",
        "Remove-KMSAlias",
        "Delete an alias",
        &[Field::string("AliasName").required()],
    )
    .impact(ConfirmImpact::High)
    .pass_thru("AliasName"),
    Operation::new(
        &KMS,
        "DeleteCustomKeyStore",
        "Remove-KMSCustomKeyStore",
        "Delete a disconnected custom key store",
        &[Field::string("CustomKeyStoreId").required()],
    )
    .impact(ConfirmImpact::High)
    .pass_thru("CustomKeyStoreId"),
    Operation::new(
        &KMS,
        "DeleteImportedKeyMaterial",
        "Remove-KMSImportedKeyMaterial",
        "Delete imported key material from a KMS key",
        &[KEY_ID, Field::string("KeyMaterialId")],
    )
    .impact(ConfirmImpact::High)
    .pass_thru("KeyId"),
    Operation::new(
        &KMS,
        "DescribeCustomKeyStores",
        "Get-KMSCustomKeyStore",
        "Describe custom key stores",
        &[
            Field::string("CustomKeyStoreId"),
            Field::string("CustomKeyStoreName"),
        ],
    )
    .select("CustomKeyStores")
    .paged(Paging::marker("CustomKeyStores", 1000)),
    Operation::new(
        &KMS,
        "DescribeKey",
        "Get-KMSKey",
        "Describe a KMS key",
        &[KEY_ID, GRANT_TOKENS],
    )
    .select("KeyMetadata"),
    Operation::new(
        &KMS,
        "DisableKey",
        "Disable-KMSKey",
        "Disable a KMS key for cryptographic operations",
        &[KEY_ID],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("KeyId"),
    Operation::new(
        &KMS,
        "DisableKeyRotation",
        "Disable-KMSKeyRotation",
        "Disable automatic rotation of key material",
        &[KEY_ID],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("KeyId"),
    Operation::new(
        &KMS,
        "DisconnectCustomKeyStore",
        "Disconnect-KMSCustomKeyStore",
        "Disconnect a custom key store from its backing key store",
        &[Field::string("CustomKeyStoreId").required()],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("CustomKeyStoreId"),
    Operation::new(
        &KMS,
        "EnableKey",
        "Enable-KMSKey",
        "Enable a KMS key",
        &[KEY_ID],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("KeyId"),
    Operation::new(
        &KMS,
        "EnableKeyRotation",
        "Enable-KMSKeyRotation",
        "Enable automatic rotation of key material",
        &[KEY_ID, Field::integer("RotationPeriodInDays")],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("KeyId"),
    Operation::new(
        &KMS,
        "Encrypt",
        "Invoke-KMSEncrypt",
        "Encrypt plaintext with a KMS key",
        &[
            KEY_ID,
            Field::blob("Plaintext").required(),
            ENCRYPTION_CONTEXT,
            GRANT_TOKENS,
            Field::one_of("EncryptionAlgorithm", ENCRYPTION_ALGORITHM),
            DRY_RUN,
        ],
    ),
    Operation::new(
        &KMS,
        "GenerateDataKey",
        "New-KMSDataKey",
        "Generate a data key encrypted under a KMS key",
        &[
            KEY_ID,
            ENCRYPTION_CONTEXT,
            Field::integer("NumberOfBytes"),
            Field::one_of("KeySpec", DATA_KEY_SPEC),
            GRANT_TOKENS,
            RECIPIENT_ALGORITHM,
            RECIPIENT_ATTESTATION,
            DRY_RUN,
        ],
    ),
    Operation::new(
        &KMS,
        "GenerateMac",
        "New-KMSMac",
        "Compute an HMAC for a message with an HMAC KMS key",
        &[
            Field::blob("Message").required(),
            KEY_ID,
            Field::one_of("MacAlgorithm", MAC_ALGORITHM).required(),
            GRANT_TOKENS,
            DRY_RUN,
        ],
    ),
    Operation::new(
        &KMS,
        "GenerateRandom",
        "Get-KMSRandom",
        "Return a random byte string",
        &[
            Field::integer("NumberOfBytes"),
            Field::string("CustomKeyStoreId"),
            RECIPIENT_ALGORITHM,
            RECIPIENT_ATTESTATION,
        ],
    )
    .select("Plaintext"),
    Operation::new(
        &KMS,
        "GetKeyPolicy",
        "Get-KMSKeyPolicy",
        "Get a key policy",
        &[KEY_ID, Field::string("PolicyName")],
    )
    .select("Policy"),
    Operation::new(
        &KMS,
        "GetKeyRotationStatus",
        "Get-KMSKeyRotationStatus",
        "Report whether automatic rotation is enabled for a key",
        &[KEY_ID],
    ),
    Operation::new(
        &KMS,
        "GetPublicKey",
        "Get-KMSPublicKey",
        "Return the public key of an asymmetric KMS key",
        &[KEY_ID, GRANT_TOKENS],
    ),
    Operation::new(
        &KMS,
        "ListAliases",
        "Get-KMSAliasList",
        "List aliases in the account and region",
        &[Field::string("KeyId")],
    )
    .select("Aliases")
    .paged(Paging::marker("Aliases", 100)),
    Operation::new(
        &KMS,
        "ListGrants",
        "Get-KMSGrantList",
        "List grants on a KMS key",
        &[
            KEY_ID,
            Field::string("GrantId"),
            Field::string("GranteePrincipal"),
        ],
    )
    .select("Grants")
    .paged(Paging::marker("Grants", 100)),
    Operation::new(
        &KMS,
        "ListKeyPolicies",
        "Get-KMSKeyPolicyList",
        "List the names of the key policies attached to a key",
        &[KEY_ID],
    )
    .select("PolicyNames")
    .paged(Paging::marker("PolicyNames", 1000)),
    Operation::new(
        &KMS,
        "ListKeys",
        "Get-KMSKeyList",
        "List KMS keys in the account and region",
        &[],
    )
    .select("Keys")
    .paged(Paging::marker("Keys", 1000)),
    Operation::new(
        &KMS,
        "ListResourceTags",
        "Get-KMSResourceTag",
        "List the tags on a KMS key",
        &[KEY_ID],
    )
    .select("Tags")
    .paged(Paging::marker("Tags", 50)),
    Operation::new(
        &KMS,
        "ListRetirableGrants",
        "Get-KMSRetirableGrant",
        "List grants a principal can retire",
        &[Field::string("RetiringPrincipal").required()],
    )
    .select("Grants")
    .paged(Paging::marker("Grants", 100)),
    Operation::new(
        &KMS,
        "PutKeyPolicy",
        "Write-KMSKeyPolicy",
        "Attach a key policy to a KMS key",
        &[
            KEY_ID,
            Field::string("PolicyName"),
            Field::string("Policy").required(),
            Field::boolean("BypassPolicyLockoutSafetyCheck"),
        ],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("KeyId"),
    Operation::new(
        &KMS,
        "ReEncrypt",
        "Invoke-KMSReEncrypt",
        "Decrypt ciphertext and re-encrypt it under another KMS key",
        &[
            Field::blob("CiphertextBlob").required(),
            Field::map("SourceEncryptionContext"),
            Field::string("SourceKeyId"),
            Field::string("DestinationKeyId").required(),
            Field::map("DestinationEncryptionContext"),
            Field::one_of("SourceEncryptionAlgorithm", ENCRYPTION_ALGORITHM),
            Field::one_of("DestinationEncryptionAlgorithm", ENCRYPTION_ALGORITHM),
            GRANT_TOKENS,
            DRY_RUN,
        ],
    ),
    Operation::new(
        &KMS,
        "RetireGrant",
        "Disable-KMSGrant",
        "Retire a grant",
        &[
            Field::string("GrantToken"),
            Field::string("KeyId"),
            Field::string("GrantId"),
            DRY_RUN,
        ],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("GrantId"),
    Operation::new(
        &KMS,
        "RevokeGrant",
        "Revoke-KMSGrant",
        "Revoke a grant",
        &[KEY_ID, Field::string("GrantId").required(), DRY_RUN],
    )
    .impact(ConfirmImpact::High)
    .pass_thru("GrantId"),
    Operation::new(
        &KMS,
        "ScheduleKeyDeletion",
        "Request-KMSKeyDeletion",
        "Schedule the deletion of a KMS key",
        &[KEY_ID, Field::integer("PendingWindowInDays")],
    )
    .impact(ConfirmImpact::High),
    Operation::new(
        &KMS,
        "Sign",
        "Invoke-KMSSigning",
        "Create a digital signature with an asymmetric KMS key",
        &[
            KEY_ID,
            Field::blob("Message").required(),
            Field::one_of("MessageType", MESSAGE_TYPE),
            GRANT_TOKENS,
            Field::one_of("SigningAlgorithm", SIGNING_ALGORITHM).required(),
            DRY_RUN,
        ],
    ),
    Operation::new(
        &KMS,
        "TagResource",
        "Add-KMSResourceTag",
        "Add or overwrite tags on a KMS key",
        &[KEY_ID, TAGS.required()],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("KeyId"),
    Operation::new(
        &KMS,
        "UntagResource",
        "Remove-KMSResourceTag",
        "Remove tags from a KMS key",
        &[KEY_ID, Field::list("TagKeys").required().aliases(&["TagKey"])],
    )
    .impact(ConfirmImpact::High)
    .pass_thru("KeyId"),
    Operation::new(
        &KMS,
        "UpdateAlias",
        "Update-KMSAlias",
        "Point an alias at a different KMS key",
        &[
            Field::string("AliasName").required(),
            Field::string("TargetKeyId").required(),
        ],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("TargetKeyId"),
    Operation::new(
        &KMS,
        "UpdateCustomKeyStore",
        "Update-KMSCustomKeyStore",
        "Change the properties of a custom key store",
        &[
            Field::string("CustomKeyStoreId").required(),
            Field::string("NewCustomKeyStoreName"),
            Field::string("KeyStorePassword"),
            Field::string("CloudHsmClusterId"),
            Field::string("XksProxyUriEndpoint").help(XKS_FIELDS_HELP),
            Field::string("XksProxyUriPath").help(XKS_FIELDS_HELP),
            Field::string("XksProxyVpcEndpointServiceName").help(XKS_FIELDS_HELP),
            Field::string("XksProxyAuthenticationCredential_AccessKeyId")
                .at("XksProxyAuthenticationCredential.AccessKeyId"),
            Field::string("XksProxyAuthenticationCredential_RawSecretAccessKey")
                .at("XksProxyAuthenticationCredential.RawSecretAccessKey"),
            Field::one_of("XksProxyConnectivity", XKS_CONNECTIVITY),
        ],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("CustomKeyStoreId"),
    Operation::new(
        &KMS,
        "UpdateKeyDescription",
        "Update-KMSKeyDescription",
        "Replace the description of a KMS key",
        &[KEY_ID, Field::string("Description").required()],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("KeyId"),
    Operation::new(
        &KMS,
        "UpdatePrimaryRegion",
        "Update-KMSPrimaryRegion",
        "Change the primary key of a multi-Region key",
        &[KEY_ID, Field::string("PrimaryRegion").required()],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("KeyId"),
    Operation::new(
        &KMS,
        "Verify",
        "Invoke-KMSVerify",
        "Verify a digital signature created by Sign",
        &[
            KEY_ID,
            Field::blob("Message").required(),
            Field::one_of("MessageType", MESSAGE_TYPE),
            Field::blob("Signature").required(),
            Field::one_of("SigningAlgorithm", SIGNING_ALGORITHM).required(),
            GRANT_TOKENS,
            DRY_RUN,
        ],
    ),
    Operation::new(
        &KMS,
        "VerifyMac",
        "Test-KMSMac",
        "Verify an HMAC computed by GenerateMac",
        &[
            Field::blob("Message").required(),
            KEY_ID,
            Field::one_of("MacAlgorithm", MAC_ALGORITHM).required(),
            Field::blob("Mac").required(),
            GRANT_TOKENS,
            DRY_RUN,
        ],
    ),
];

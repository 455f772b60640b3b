pub const APP_STYLES: &str = r#"
.annotator {
    max-width: 960px;
    margin: 0 auto;
    padding: 1.5rem;
    font-family: system-ui, -apple-system, sans-serif;
    color: #1f2937;
}

.add-input-form {
    display: flex;
    gap: 0.5rem;
    margin-bottom: 1rem;
}

.add-input-form input,
.add-input-form textarea {
    flex: 1;
    padding: 0.5rem;
    border: 1px solid #d1d5db;
    border-radius: 6px;
}

.input-card {
    border: 1px solid #e5e7eb;
    border-radius: 8px;
    padding: 1rem;
    margin-bottom: 1rem;
}

.input-card header {
    display: flex;
    justify-content: space-between;
    align-items: baseline;
}

.document-type {
    font-size: 0.75rem;
    color: #6b7280;
    text-transform: uppercase;
}

.name-input {
    font-size: 1.5rem;
    border: 1px solid transparent;
    background: transparent;
    padding: 0.25rem;
}

.name-input.editing {
    border-color: #3b82f6;
    background: #fff;
}

.markdown-content {
    cursor: text;
    line-height: 1.6;
}

.markdown-content table {
    border-collapse: collapse;
}

.markdown-content th,
.markdown-content td {
    border: 1px solid #e5e7eb;
    padding: 0.25rem 0.5rem;
}

.summary-editor {
    width: 100%;
    min-height: 12rem;
    font-family: ui-monospace, monospace;
    padding: 0.5rem;
}

.tracked-button,
.save-button,
.add-input-form button {
    padding: 0.5rem 1rem;
    border: none;
    border-radius: 6px;
    background: #3b82f6;
    color: #fff;
    cursor: pointer;
}

.tracked-button.secondary {
    background: #6b7280;
}

.tracked-button.danger {
    background: #dc2626;
}

button:disabled {
    opacity: 0.6;
    cursor: not-allowed;
}

.input-actions {
    display: flex;
    gap: 0.5rem;
    margin-top: 1rem;
}

.claim-edit {
    border-left: 3px solid #3b82f6;
    padding: 0.5rem 1rem;
    margin-bottom: 0.75rem;
    background: #f9fafb;
}

.claim-edit dl {
    display: grid;
    grid-template-columns: max-content 1fr;
    gap: 0.25rem 1rem;
    margin: 0.5rem 0 0;
}

.claim-edit dt {
    font-weight: 600;
    color: #4b5563;
}

.claim-edit dd {
    margin: 0;
}

.error-banner {
    padding: 1rem;
    border-radius: 6px;
    background: #fee2e2;
    color: #991b1b;
}
"#;

//! Frontend module file templates.
//!
//! Each function renders one file of a scaffolded module from its
//! [`ModuleManifest`]. Manifest text placed inside single-quoted string
//! literals is escaped.

use ms_core::ModuleManifest;

/// Renders `module.config.ts`.
#[must_use]
pub fn module_config(manifest: &ModuleManifest) -> String {
    let ident = manifest.identifier();
    let permissions = manifest
        .permissions
        .iter()
        .map(|p| format!("\"{p}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r"/**
 * {title} Module Configuration
 */

import {{ ModuleConfig }} from '../../core/types';

export const {ident}ModuleConfig: ModuleConfig = {{
  id: '{id}',
  name: '{name}',
  description: '{description}',
  version: '1.0.0',
  enabled: true,
  category: '{category}',
  showInMenu: true,
  dependencies: ['auth'],
  requiredPermissions: [{permissions}],
}};

export default {ident}ModuleConfig;
",
        title = manifest.name,
        id = manifest.id,
        name = quoted(&manifest.name),
        description = quoted(&manifest.description),
        category = quoted(&manifest.category),
    )
}

/// Renders `types/index.ts`: the entity and its create/update requests.
#[must_use]
pub fn types(manifest: &ModuleManifest) -> String {
    let pascal = manifest.pascal_name();
    format!(
        r"/**
 * {title} Module Types
 */

export interface {pascal} {{
  id: string;
  name: string;
  description?: string;
  status: 'active' | 'inactive';
  createdAt: string;
  updatedAt: string;
}}

export interface Create{pascal}Request {{
  name: string;
  description?: string;
}}

export interface Update{pascal}Request {{
  name?: string;
  description?: string;
  status?: 'active' | 'inactive';
}}
",
        title = manifest.name,
    )
}

/// Renders `services/<id>.service.ts`: CRUD calls against `/<id>`.
#[must_use]
pub fn service(manifest: &ModuleManifest) -> String {
    let pascal = manifest.pascal_name();
    format!(
        r"/**
 * {title} Service
 */

import api, {{ extractData }} from '../../../core/utils/api';
import {{ {pascal}, Create{pascal}Request, Update{pascal}Request }} from '../types';
import {{ PaginatedResult, PaginationParams }} from '../../../core/types';

export const getAll = async (params?: PaginationParams): Promise<PaginatedResult<{pascal}>> => {{
  const response = await api.get('/{id}', {{ params }});
  return extractData(response);
}};

export const getById = async (id: string): Promise<{pascal}> => {{
  const response = await api.get(`/{id}/${{id}}`);
  return extractData(response);
}};

export const create = async (data: Create{pascal}Request): Promise<{pascal}> => {{
  const response = await api.post('/{id}', data);
  return extractData(response);
}};

export const update = async (id: string, data: Update{pascal}Request): Promise<{pascal}> => {{
  const response = await api.put(`/{id}/${{id}}`, data);
  return extractData(response);
}};

export const remove = async (id: string): Promise<void> => {{
  await api.delete(`/{id}/${{id}}`);
}};
",
        title = manifest.name,
        id = manifest.id,
    )
}

/// Renders `pages/<Pascal>ListPage.tsx`: a data table over `getAll`.
#[must_use]
pub fn list_page(manifest: &ModuleManifest) -> String {
    let pascal = manifest.pascal_name();
    let ident = manifest.identifier();
    format!(
        r#"/**
 * {title} List Page
 */

import React, {{ useState, useEffect }} from 'react';
import {{ AppLayout, Card, Button, DataTable }} from '../../shared';
import * as {ident}Service from '../services/{id}.service';
import {{ {pascal} }} from '../types';
import {{ handleApiError }} from '../../../core/utils/api';

export const {pascal}ListPage: React.FC = () => {{
  const [data, setData] = useState<{pascal}[]>([]);
  const [isLoading, setIsLoading] = useState(true);

  useEffect(() => {{
    loadData();
  }}, []);

  const loadData = async () => {{
    setIsLoading(true);
    try {{
      const result = await {ident}Service.getAll();
      setData(result.data);
    }} catch (error) {{
      console.error('Error loading data:', handleApiError(error));
    }} finally {{
      setIsLoading(false);
    }}
  }};

  return (
    <AppLayout>
      <div className="page-container">
        <div className="page-header">
          <h1 className="text-3xl font-bold text-gray-900">{title}</h1>
          <Button variant="primary">Create New</Button>
        </div>

        <Card noPadding>
          <DataTable
            columns={{[
              {{ key: 'name', label: 'Name', sortable: true }},
              {{ key: 'status', label: 'Status' }},
              {{ key: 'createdAt', label: 'Created at' }},
            ]}}
            data={{data}}
            keyExtractor={{(record) => record.id}}
            isLoading={{isLoading}}
          />
        </Card>
      </div>
    </AppLayout>
  );
}};

export default {pascal}ListPage;
"#,
        title = manifest.name,
        id = manifest.id,
    )
}

/// Renders `routes.tsx`: one lazily loaded, permission-guarded list route.
#[must_use]
pub fn routes(manifest: &ModuleManifest) -> String {
    let pascal = manifest.pascal_name();
    let ident = manifest.identifier();
    let permissions = manifest
        .permissions
        .iter()
        .map(|p| format!("'{p}'"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r"/**
 * {title} Module Routes
 */

import {{ lazy }} from 'react';
import {{ ProtectedRouteConfig }} from '../../core/types';

const {pascal}ListPage = lazy(() => import('./pages/{pascal}ListPage'));

export const {ident}Routes: ProtectedRouteConfig[] = [
  {{
    path: '/{id}',
    element: <{pascal}ListPage />,
    requiredPermissions: [{permissions}],
    meta: {{
      title: '{name}',
    }},
  }},
];

export default {ident}Routes;
",
        title = manifest.name,
        id = manifest.id,
        name = quoted(&manifest.name),
    )
}

/// Renders `index.ts`, the module's barrel export.
#[must_use]
pub fn index(manifest: &ModuleManifest) -> String {
    let ident = manifest.identifier();
    format!(
        r"/**
 * {title} Module Barrel Export
 */

export * from './types';
export * as {ident}Service from './services/{id}.service';
export {{ default as {ident}Routes }} from './routes';
export {{ default as {ident}ModuleConfig }} from './module.config';
",
        title = manifest.name,
        id = manifest.id,
    )
}

/// Escapes text for a single-quoted TypeScript string literal.
fn quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> ModuleManifest {
        ModuleManifest {
            id: "people-growth".to_owned(),
            name: "People Growth".to_owned(),
            description: "Development plans".to_owned(),
            category: "hr".to_owned(),
            permissions: vec!["people-growth.read".to_owned(), "people-growth.write".to_owned()],
        }
    }

    #[test]
    fn test_module_config() {
        insta::assert_snapshot!(module_config(&manifest()), @r#"
        /**
         * People Growth Module Configuration
         */

        import { ModuleConfig } from '../../core/types';

        export const peoplegrowthModuleConfig: ModuleConfig = {
          id: 'people-growth',
          name: 'People Growth',
          description: 'Development plans',
          version: '1.0.0',
          enabled: true,
          category: 'hr',
          showInMenu: true,
          dependencies: ['auth'],
          requiredPermissions: ["people-growth.read", "people-growth.write"],
        };

        export default peoplegrowthModuleConfig;
        "#);
    }

    #[test]
    fn test_types() {
        insta::assert_snapshot!(types(&manifest()), @r"
        /**
         * People Growth Module Types
         */

        export interface PeopleGrowth {
          id: string;
          name: string;
          description?: string;
          status: 'active' | 'inactive';
          createdAt: string;
          updatedAt: string;
        }

        export interface CreatePeopleGrowthRequest {
          name: string;
          description?: string;
        }

        export interface UpdatePeopleGrowthRequest {
          name?: string;
          description?: string;
          status?: 'active' | 'inactive';
        }
        ");
    }

    #[test]
    fn test_service() {
        insta::assert_snapshot!(service(&manifest()), @r"
        /**
         * People Growth Service
         */

        import api, { extractData } from '../../../core/utils/api';
        import { PeopleGrowth, CreatePeopleGrowthRequest, UpdatePeopleGrowthRequest } from '../types';
        import { PaginatedResult, PaginationParams } from '../../../core/types';

        export const getAll = async (params?: PaginationParams): Promise<PaginatedResult<PeopleGrowth>> => {
          const response = await api.get('/people-growth', { params });
          return extractData(response);
        };

        export const getById = async (id: string): Promise<PeopleGrowth> => {
          const response = await api.get(`/people-growth/${id}`);
          return extractData(response);
        };

        export const create = async (data: CreatePeopleGrowthRequest): Promise<PeopleGrowth> => {
          const response = await api.post('/people-growth', data);
          return extractData(response);
        };

        export const update = async (id: string, data: UpdatePeopleGrowthRequest): Promise<PeopleGrowth> => {
          const response = await api.put(`/people-growth/${id}`, data);
          return extractData(response);
        };

        export const remove = async (id: string): Promise<void> => {
          await api.delete(`/people-growth/${id}`);
        };
        ");
    }

    #[test]
    fn test_list_page_names() {
        let page = list_page(&manifest());
        assert!(page.contains("import * as peoplegrowthService from '../services/people-growth.service';"));
        assert!(page.contains("export const PeopleGrowthListPage: React.FC = () => {"));
        assert!(page.contains("const result = await peoplegrowthService.getAll();"));
        assert!(page.contains(r#"<h1 className="text-3xl font-bold text-gray-900">People Growth</h1>"#));
        assert!(page.contains("            columns={[\n              { key: 'name', label: 'Name', sortable: true },"));
        assert!(page.ends_with("export default PeopleGrowthListPage;\n"));
    }

    #[test]
    fn test_routes() {
        insta::assert_snapshot!(routes(&manifest()), @r"
        /**
         * People Growth Module Routes
         */

        import { lazy } from 'react';
        import { ProtectedRouteConfig } from '../../core/types';

        const PeopleGrowthListPage = lazy(() => import('./pages/PeopleGrowthListPage'));

        export const peoplegrowthRoutes: ProtectedRouteConfig[] = [
          {
            path: '/people-growth',
            element: <PeopleGrowthListPage />,
            requiredPermissions: ['people-growth.read', 'people-growth.write'],
            meta: {
              title: 'People Growth',
            },
          },
        ];

        export default peoplegrowthRoutes;
        ");
    }

    #[test]
    fn test_index() {
        insta::assert_snapshot!(index(&manifest()), @r"
        /**
         * People Growth Module Barrel Export
         */

        export * from './types';
        export * as peoplegrowthService from './services/people-growth.service';
        export { default as peoplegrowthRoutes } from './routes';
        export { default as peoplegrowthModuleConfig } from './module.config';
        ");
    }

    #[test]
    fn test_quotes_are_escaped_and_empty_permissions() {
        let mut manifest = ModuleManifest::new("settings", "Owner's Settings");
        manifest.description = r"C:\ paths".to_owned();

        let config = module_config(&manifest);
        assert!(config.contains(r"  name: 'Owner\'s Settings',"));
        assert!(config.contains(r"  description: 'C:\\ paths',"));
        assert!(config.contains("  requiredPermissions: [],"));

        let routes = routes(&manifest);
        assert!(routes.contains("    requiredPermissions: [],"));
        assert!(routes.contains(r"      title: 'Owner\'s Settings',"));
    }
}
